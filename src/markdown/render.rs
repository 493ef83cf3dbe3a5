//! Syntax tree to HTML rendering.
//!
//! Text is escaped, `html` nodes are emitted verbatim. Code blocks carry
//! the configured highlight theme as a class and `data-theme` attribute so
//! theme stylesheets can target them.

use rustc_hash::FxHashMap;
use std::fmt::Write;

use super::tree::{Align, Node, NodeKind};
use crate::utils::html::{escape, escape_attr};
use crate::utils::slug::slugify;

/// Rendering options.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Syntax highlight theme name (e.g. `github-dark`).
    pub theme: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            theme: "github-dark".into(),
        }
    }
}

/// Render a tree to an HTML fragment.
pub fn render_html(root: &Node, options: &RenderOptions) -> String {
    let mut renderer = Renderer {
        out: String::with_capacity(1024),
        options,
        ids: FxHashMap::default(),
    };
    renderer.node(root);
    renderer.out
}

struct Renderer<'a> {
    out: String,
    options: &'a RenderOptions,
    /// Heading id occurrences, for de-duplication.
    ids: FxHashMap<String, usize>,
}

impl Renderer<'_> {
    fn children(&mut self, node: &Node) {
        for child in &node.children {
            self.node(child);
        }
    }

    fn wrap(&mut self, tag: &str, node: &Node) {
        let _ = write!(self.out, "<{tag}>");
        self.children(node);
        let _ = write!(self.out, "</{tag}>");
    }

    fn node(&mut self, node: &Node) {
        match &node.kind {
            NodeKind::Root => self.children(node),

            NodeKind::Paragraph => {
                self.wrap("p", node);
                self.out.push('\n');
            }
            NodeKind::Heading { depth, id } => {
                let id = match id {
                    Some(id) => id.clone(),
                    None => self.unique_id(&slugify(&node.plain_text())),
                };
                if id.is_empty() {
                    let _ = write!(self.out, "<h{depth}>");
                } else {
                    let _ = write!(self.out, "<h{depth} id=\"{}\">", escape_attr(&id));
                }
                self.children(node);
                let _ = writeln!(self.out, "</h{depth}>");
            }
            NodeKind::Blockquote => {
                self.out.push_str("<blockquote>\n");
                self.children(node);
                self.out.push_str("</blockquote>\n");
            }
            NodeKind::Code { lang, .. } => self.code_block(lang.as_deref(), &node.value),
            NodeKind::Html => self.out.push_str(&node.value),
            NodeKind::List { ordered, start } => {
                match (ordered, start) {
                    (true, Some(n)) if *n != 1 => {
                        let _ = writeln!(self.out, "<ol start=\"{n}\">");
                    }
                    (true, _) => self.out.push_str("<ol>\n"),
                    (false, _) => self.out.push_str("<ul>\n"),
                }
                self.children(node);
                self.out.push_str(if *ordered { "</ol>\n" } else { "</ul>\n" });
            }
            NodeKind::ListItem { checked } => {
                self.out.push_str("<li>");
                match checked {
                    Some(true) => self.out.push_str("<input type=\"checkbox\" disabled checked> "),
                    Some(false) => self.out.push_str("<input type=\"checkbox\" disabled> "),
                    None => {}
                }
                self.children(node);
                self.out.push_str("</li>\n");
            }
            NodeKind::ThematicBreak => self.out.push_str("<hr>\n"),
            NodeKind::Table { align } => self.table(node, align),
            // Rendered by `table`
            NodeKind::TableHead | NodeKind::TableRow | NodeKind::TableCell => self.children(node),
            NodeKind::FootnoteDefinition { label } => {
                let _ = write!(
                    self.out,
                    "<div class=\"footnote\" id=\"fn-{}\">",
                    escape_attr(label)
                );
                self.children(node);
                self.out.push_str("</div>\n");
            }
            NodeKind::DefinitionList => {
                self.out.push_str("<dl>\n");
                self.children(node);
                self.out.push_str("</dl>\n");
            }
            NodeKind::DefinitionTerm => {
                self.wrap("dt", node);
                self.out.push('\n');
            }
            NodeKind::DefinitionDescription => {
                self.wrap("dd", node);
                self.out.push('\n');
            }
            NodeKind::Math => {
                let _ = writeln!(
                    self.out,
                    "<div class=\"math math-display\">{}</div>",
                    escape(&node.value)
                );
            }

            NodeKind::Text => self.out.push_str(&escape(&node.value)),
            NodeKind::InlineCode => {
                let _ = write!(self.out, "<code>{}</code>", escape(&node.value));
            }
            NodeKind::InlineMath => {
                let _ = write!(
                    self.out,
                    "<span class=\"math math-inline\">{}</span>",
                    escape(&node.value)
                );
            }
            NodeKind::Emphasis => self.wrap("em", node),
            NodeKind::Strong => self.wrap("strong", node),
            NodeKind::Delete => self.wrap("del", node),
            NodeKind::Superscript => self.wrap("sup", node),
            NodeKind::Subscript => self.wrap("sub", node),
            NodeKind::Link { url, title } => {
                let _ = write!(self.out, "<a href=\"{}\"", escape_attr(url));
                if let Some(title) = title {
                    let _ = write!(self.out, " title=\"{}\"", escape_attr(title));
                }
                self.out.push('>');
                self.children(node);
                self.out.push_str("</a>");
            }
            NodeKind::Image { url, title } => {
                let _ = write!(
                    self.out,
                    "<img src=\"{}\" alt=\"{}\"",
                    escape_attr(url),
                    escape_attr(&node.plain_text())
                );
                if let Some(title) = title {
                    let _ = write!(self.out, " title=\"{}\"", escape_attr(title));
                }
                self.out.push('>');
            }
            NodeKind::Break => self.out.push_str("<br>\n"),
            NodeKind::FootnoteReference { label } => {
                let label = escape_attr(label);
                let _ = write!(
                    self.out,
                    "<sup class=\"footnote-ref\"><a href=\"#fn-{label}\" id=\"fnref-{label}\">[{label}]</a></sup>"
                );
            }
        }
    }

    fn code_block(&mut self, lang: Option<&str>, source: &str) {
        let theme = escape_attr(&self.options.theme);
        let _ = write!(
            self.out,
            "<pre class=\"highlight {theme}\" data-theme=\"{theme}\"><code"
        );
        if let Some(lang) = lang {
            let _ = write!(self.out, " class=\"language-{}\"", escape_attr(lang));
        }
        let _ = writeln!(self.out, ">{}</code></pre>", escape(source));
    }

    /// Tables: the head holds cells directly, body rows follow it.
    fn table(&mut self, node: &Node, align: &[Align]) {
        self.out.push_str("<table>\n");
        let mut body_open = false;

        for section in &node.children {
            match section.kind {
                NodeKind::TableHead => {
                    self.out.push_str("<thead>\n<tr>");
                    self.cells(section, "th", align);
                    self.out.push_str("</tr>\n</thead>\n");
                }
                NodeKind::TableRow => {
                    if !body_open {
                        self.out.push_str("<tbody>\n");
                        body_open = true;
                    }
                    self.out.push_str("<tr>");
                    self.cells(section, "td", align);
                    self.out.push_str("</tr>\n");
                }
                _ => self.node(section),
            }
        }

        if body_open {
            self.out.push_str("</tbody>\n");
        }
        self.out.push_str("</table>\n");
    }

    fn cells(&mut self, row: &Node, tag: &str, align: &[Align]) {
        for (i, cell) in row.children.iter().enumerate() {
            match align.get(i).and_then(|a| a.as_css()) {
                Some(css) => {
                    let _ = write!(self.out, "<{tag} style=\"text-align: {css}\">");
                }
                None => {
                    let _ = write!(self.out, "<{tag}>");
                }
            }
            self.children(cell);
            let _ = write!(self.out, "</{tag}>");
        }
    }

    /// Suffix repeated heading ids: `intro`, `intro-1`, `intro-2`.
    fn unique_id(&mut self, base: &str) -> String {
        if base.is_empty() {
            return String::new();
        }
        let count = self.ids.entry(base.to_string()).or_insert(0);
        let id = if *count == 0 {
            base.to_string()
        } else {
            format!("{base}-{count}")
        };
        *count += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::{MarkdownOptions, from_markdown, transform::rewrite_mermaid};

    fn render(md: &str) -> String {
        render_html(
            &from_markdown(md, &MarkdownOptions::all()),
            &RenderOptions::default(),
        )
    }

    #[test]
    fn test_paragraph_escaped() {
        assert_eq!(render("a < b & c"), "<p>a &lt; b &amp; c</p>\n");
    }

    #[test]
    fn test_heading_ids() {
        let html = render("# Intro\n\n## Intro\n\n### Custom {#mine}\n");
        assert!(html.contains("<h1 id=\"intro\">Intro</h1>"));
        assert!(html.contains("<h2 id=\"intro-1\">Intro</h2>"));
        assert!(html.contains("<h3 id=\"mine\">Custom</h3>"));
    }

    #[test]
    fn test_code_block_theme() {
        let html = render("```js\nconsole.log(\"<1>\")\n```\n");
        assert_eq!(
            html,
            "<pre class=\"highlight github-dark\" data-theme=\"github-dark\"><code class=\"language-js\">console.log(&quot;&lt;1&gt;&quot;)</code></pre>\n"
        );
    }

    #[test]
    fn test_mermaid_rendered_verbatim() {
        let mut tree = from_markdown("```mermaid\ngraph TD; A-->B;\n```\n", &MarkdownOptions::all());
        rewrite_mermaid(&mut tree);
        let html = render_html(&tree, &RenderOptions::default());
        assert_eq!(html, "<div class=\"mermaid\">graph TD; A-->B;</div>");
    }

    #[test]
    fn test_list_and_tasks() {
        let html = render("3. a\n4. b\n");
        assert!(html.starts_with("<ol start=\"3\">"));
        let html = render("- [x] done\n");
        assert!(html.contains("<li><input type=\"checkbox\" disabled checked> done</li>"));
    }

    #[test]
    fn test_table() {
        let html = render("| a | b |\n|:-:|---|\n| 1 | 2 |\n");
        assert!(html.contains("<thead>\n<tr><th style=\"text-align: center\">a</th><th>b</th></tr>"));
        assert!(html.contains("<tbody>\n<tr><td style=\"text-align: center\">1</td><td>2</td></tr>"));
    }

    #[test]
    fn test_link_and_image() {
        let html = render("[x](/a?b=1&c=2) ![alt \"q\"](/i.png)");
        assert!(html.contains("<a href=\"/a?b=1&amp;c=2\">x</a>"));
        assert!(html.contains("<img src=\"/i.png\" alt=\"alt &quot;q&quot;\">"));
    }
}
