//! Markdown source to syntax tree conversion using pulldown-cmark.

use pulldown_cmark::{
    Alignment, CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag as CmarkTag,
};

use super::tree::{Align, Node, NodeKind, Tag};

/// Containers nested deeper than this are flattened into their ancestor.
pub const MAX_DEPTH: usize = 256;

/// Options for markdown conversion
#[derive(Debug, Clone, Default)]
pub struct MarkdownOptions {
    /// Enable tables extension
    pub tables: bool,
    /// Enable footnotes extension
    pub footnotes: bool,
    /// Enable strikethrough extension
    pub strikethrough: bool,
    /// Enable task lists extension
    pub task_lists: bool,
    /// Enable heading attributes extension (e.g., `# Heading {#custom-id}`)
    pub heading_attributes: bool,
    /// Enable `$inline$` and `$$display$$` math
    pub math: bool,
}

impl MarkdownOptions {
    /// Create options with all extensions enabled
    pub fn all() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            task_lists: true,
            heading_attributes: true,
            math: true,
        }
    }

    /// Convert to pulldown-cmark Options
    fn to_pulldown_options(&self) -> Options {
        let mut opts = Options::empty();
        if self.tables {
            opts.insert(Options::ENABLE_TABLES);
        }
        if self.footnotes {
            opts.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.strikethrough {
            opts.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.task_lists {
            opts.insert(Options::ENABLE_TASKLISTS);
        }
        if self.heading_attributes {
            opts.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        }
        if self.math {
            opts.insert(Options::ENABLE_MATH);
        }
        opts
    }
}

/// Open container on the conversion stack.
struct Frame {
    node: Node,
    /// Container has no tree counterpart; dropped on close.
    skip: bool,
}

/// Markdown to tree converter
struct TreeBuilder {
    /// Stack of open containers (for nested structures)
    stack: Vec<Frame>,
    /// Root children (collected when stack is empty)
    root_children: Vec<Node>,
    /// Open containers past `MAX_DEPTH`, which have no frame of their own.
    flattened: usize,
    warned: bool,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: Vec::new(),
            root_children: Vec::new(),
            flattened: 0,
            warned: false,
        }
    }

    fn convert(mut self, markdown: &str, options: &MarkdownOptions) -> Node {
        let parser = Parser::new_ext(markdown, options.to_pulldown_options());

        for event in parser {
            self.handle_event(event);
        }

        // Unbalanced input cannot come out of pulldown-cmark, but close
        // anything left open rather than losing it.
        while !self.stack.is_empty() {
            self.end_tag();
        }

        Node::root(self.root_children)
    }

    fn handle_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(_) => self.end_tag(),
            Event::Text(text) => self.add_text(text),
            Event::Code(code) => self.add_leaf(NodeKind::InlineCode, code.into_string()),
            Event::Html(html) => self.add_html(html),
            Event::InlineHtml(html) => self.add_leaf(NodeKind::Html, html.into_string()),
            Event::SoftBreak => self.add_text(CowStr::Borrowed("\n")),
            Event::HardBreak => self.add_node(Node::new(NodeKind::Break)),
            Event::Rule => self.add_node(Node::new(NodeKind::ThematicBreak)),
            Event::FootnoteReference(label) => self.add_node(Node::new(
                NodeKind::FootnoteReference {
                    label: label.into_string(),
                },
            )),
            Event::TaskListMarker(checked) => self.mark_task(checked),
            Event::InlineMath(math) => self.add_leaf(NodeKind::InlineMath, math.into_string()),
            Event::DisplayMath(math) => self.add_leaf(NodeKind::Math, math.into_string()),
        }
    }

    fn start_tag(&mut self, tag: CmarkTag<'_>) {
        if self.stack.len() >= MAX_DEPTH {
            if !self.warned {
                crate::log!("warning"; "markdown nested deeper than {MAX_DEPTH} levels, flattening");
                self.warned = true;
            }
            self.flattened += 1;
            return;
        }
        let (kind, skip) = match tag {
            CmarkTag::MetadataBlock(_) => (NodeKind::Html, true),
            tag => (tag_to_kind(tag), false),
        };
        self.stack.push(Frame {
            node: Node::new(kind),
            skip,
        });
    }

    fn end_tag(&mut self) {
        if self.flattened > 0 {
            self.flattened -= 1;
            return;
        }
        if let Some(frame) = self.stack.pop()
            && !frame.skip
        {
            let mut node = frame.node;
            // Fenced code keeps the fence's trailing newline out of the value.
            if node.tag() == Tag::Code && node.value.ends_with('\n') {
                node.value.pop();
            }
            self.add_node(node);
        }
    }

    /// Text inside code and html blocks is their literal value; elsewhere it
    /// becomes a text node, merged with a preceding text sibling.
    fn add_text(&mut self, text: CowStr<'_>) {
        if text.is_empty() {
            return;
        }

        if let Some(frame) = self.stack.last_mut()
            && matches!(frame.node.tag(), Tag::Code | Tag::Html)
        {
            frame.node.value.push_str(&text);
            return;
        }

        let siblings = self.current_children();
        if let Some(last) = siblings.last_mut()
            && last.tag() == Tag::Text
        {
            last.value.push_str(&text);
        } else {
            siblings.push(Node::text(text.into_string()));
        }
    }

    /// Block-level html arrives as a sequence of events inside `HtmlBlock`.
    fn add_html(&mut self, html: CowStr<'_>) {
        match self.stack.last_mut() {
            Some(frame) if frame.node.tag() == Tag::Html => frame.node.value.push_str(&html),
            _ => self.add_leaf(NodeKind::Html, html.into_string()),
        }
    }

    fn add_leaf(&mut self, kind: NodeKind, value: String) {
        self.add_node(Node::leaf(kind, value));
    }

    /// Task markers belong to the innermost list item.
    fn mark_task(&mut self, checked: bool) {
        if let Some(frame) = self
            .stack
            .iter_mut()
            .rev()
            .find(|f| f.node.tag() == Tag::ListItem)
        {
            frame.node.kind = NodeKind::ListItem {
                checked: Some(checked),
            };
        }
    }

    fn add_node(&mut self, node: Node) {
        self.current_children().push(node);
    }

    fn current_children(&mut self) -> &mut Vec<Node> {
        match self.stack.last_mut() {
            Some(frame) => &mut frame.node.children,
            None => &mut self.root_children,
        }
    }
}

/// Map a pulldown-cmark container tag to a tree node kind.
fn tag_to_kind(tag: CmarkTag<'_>) -> NodeKind {
    match tag {
        // Block elements
        CmarkTag::Paragraph => NodeKind::Paragraph,
        CmarkTag::Heading { level, id, .. } => NodeKind::Heading {
            depth: heading_depth(level),
            id: id.map(CowStr::into_string),
        },
        CmarkTag::BlockQuote(_) => NodeKind::Blockquote,
        CmarkTag::CodeBlock(kind) => match kind {
            CodeBlockKind::Indented => NodeKind::Code {
                lang: None,
                meta: None,
            },
            CodeBlockKind::Fenced(info) => {
                let (lang, meta) = split_info(&info);
                NodeKind::Code { lang, meta }
            }
        },
        CmarkTag::HtmlBlock => NodeKind::Html,
        CmarkTag::List(start) => NodeKind::List {
            ordered: start.is_some(),
            start,
        },
        CmarkTag::Item => NodeKind::ListItem { checked: None },
        CmarkTag::FootnoteDefinition(label) => NodeKind::FootnoteDefinition {
            label: label.into_string(),
        },

        // Table elements
        CmarkTag::Table(alignments) => NodeKind::Table {
            align: alignments.into_iter().map(map_align).collect(),
        },
        CmarkTag::TableHead => NodeKind::TableHead,
        CmarkTag::TableRow => NodeKind::TableRow,
        CmarkTag::TableCell => NodeKind::TableCell,

        // Inline elements
        CmarkTag::Emphasis => NodeKind::Emphasis,
        CmarkTag::Strong => NodeKind::Strong,
        CmarkTag::Strikethrough => NodeKind::Delete,
        CmarkTag::Superscript => NodeKind::Superscript,
        CmarkTag::Subscript => NodeKind::Subscript,
        CmarkTag::Link {
            dest_url, title, ..
        } => NodeKind::Link {
            url: dest_url.into_string(),
            title: non_empty(title),
        },
        // alt text arrives as children
        CmarkTag::Image {
            dest_url, title, ..
        } => NodeKind::Image {
            url: dest_url.into_string(),
            title: non_empty(title),
        },

        // Definition list (extended syntax)
        CmarkTag::DefinitionList => NodeKind::DefinitionList,
        CmarkTag::DefinitionListTitle => NodeKind::DefinitionTerm,
        CmarkTag::DefinitionListDefinition => NodeKind::DefinitionDescription,

        // Filtered out by the caller
        CmarkTag::MetadataBlock(_) => NodeKind::Html,
    }
}

/// Split a fence info string into language and the remaining meta.
///
/// ```text
/// "mermaid"            -> (Some("mermaid"), None)
/// "js title=\"a.js\""  -> (Some("js"), Some("title=\"a.js\""))
/// ""                   -> (None, None)
/// ```
fn split_info(info: &str) -> (Option<String>, Option<String>) {
    let info = info.trim();
    if info.is_empty() {
        return (None, None);
    }
    match info.split_once(char::is_whitespace) {
        Some((lang, meta)) => {
            let meta = meta.trim();
            (
                Some(lang.to_string()),
                (!meta.is_empty()).then(|| meta.to_string()),
            )
        }
        None => (Some(info.to_string()), None),
    }
}

fn non_empty(s: CowStr<'_>) -> Option<String> {
    (!s.is_empty()).then(|| s.into_string())
}

const fn map_align(align: Alignment) -> Align {
    match align {
        Alignment::None => Align::None,
        Alignment::Left => Align::Left,
        Alignment::Center => Align::Center,
        Alignment::Right => Align::Right,
    }
}

const fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Convert a markdown string to a syntax tree rooted at a `Root` node.
pub fn from_markdown(markdown: &str, options: &MarkdownOptions) -> Node {
    TreeBuilder::new().convert(markdown, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(md: &str) -> Node {
        from_markdown(md, &MarkdownOptions::all())
    }

    #[test]
    fn test_paragraph_text_merged() {
        let tree = parse("Hello *big* world");
        assert_eq!(tree.tag(), Tag::Root);
        let p = &tree.children[0];
        assert_eq!(p.tag(), Tag::Paragraph);
        assert_eq!(p.children.len(), 3);
        assert_eq!(p.plain_text(), "Hello big world");
    }

    #[test]
    fn test_heading() {
        let tree = parse("## Title {#custom}");
        assert_eq!(
            tree.children[0].kind,
            NodeKind::Heading {
                depth: 2,
                id: Some("custom".into())
            }
        );
        assert_eq!(tree.children[0].plain_text(), "Title");
    }

    #[test]
    fn test_fenced_code() {
        let tree = parse("```mermaid\ngraph TD; A-->B;\n```\n");
        let code = &tree.children[0];
        assert_eq!(code.tag(), Tag::Code);
        assert_eq!(code.kind.lang(), Some("mermaid"));
        assert_eq!(code.value, "graph TD; A-->B;");
        assert!(code.children.is_empty());
    }

    #[test]
    fn test_fenced_code_meta_and_no_lang() {
        let tree = parse("```js title=\"a.js\"\nlet a = 1;\n```\n\n```\nplain\n```\n");
        assert_eq!(
            tree.children[0].kind,
            NodeKind::Code {
                lang: Some("js".into()),
                meta: Some("title=\"a.js\"".into())
            }
        );
        assert_eq!(tree.children[1].kind.lang(), None);
        assert_eq!(tree.children[1].value, "plain");
    }

    #[test]
    fn test_indented_code() {
        let tree = parse("    indented\n");
        assert_eq!(tree.children[0].tag(), Tag::Code);
        assert_eq!(tree.children[0].kind.lang(), None);
        assert_eq!(tree.children[0].value, "indented");
    }

    #[test]
    fn test_html_block() {
        let tree = parse("<div class=\"note\">\nhi\n</div>\n");
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].tag(), Tag::Html);
        assert!(tree.children[0].value.starts_with("<div class=\"note\">"));
    }

    #[test]
    fn test_link_and_image() {
        let tree = parse("[Link](https://example.com \"T\") ![alt](/a.png)");
        let p = &tree.children[0];
        assert_eq!(
            p.children[0].kind,
            NodeKind::Link {
                url: "https://example.com".into(),
                title: Some("T".into())
            }
        );
        let img = p.children.iter().find(|n| n.tag() == Tag::Image).unwrap();
        assert_eq!(img.plain_text(), "alt");
    }

    #[test]
    fn test_task_list() {
        let tree = parse("- [x] done\n- [ ] todo\n- plain\n");
        let list = &tree.children[0];
        assert_eq!(
            list.kind,
            NodeKind::List {
                ordered: false,
                start: None
            }
        );
        let checked: Vec<_> = list
            .children
            .iter()
            .map(|item| match item.kind {
                NodeKind::ListItem { checked } => checked,
                _ => panic!("expected list item"),
            })
            .collect();
        assert_eq!(checked, [Some(true), Some(false), None]);
    }

    #[test]
    fn test_nested_code_in_list() {
        let tree = parse("1. step\n\n   ```mermaid\n   graph LR; A-->B;\n   ```\n");
        let mut langs = Vec::new();
        crate::markdown::visit::visit(&tree, Tag::Code, |n| langs.push(n.kind.lang()));
        assert_eq!(langs, [Some("mermaid")]);
    }

    #[test]
    fn test_table() {
        let tree = parse("| a | b |\n|:--|--:|\n| 1 | 2 |\n");
        assert_eq!(
            tree.children[0].kind,
            NodeKind::Table {
                align: vec![Align::Left, Align::Right]
            }
        );
    }

    #[test]
    fn test_depth_capped() {
        let tree = parse(&format!("{}deep\n", "> ".repeat(MAX_DEPTH + 50)));

        let mut depth = 0;
        let mut node = &tree;
        while let Some(child) = node.children.first() {
            if child.tag() == Tag::Blockquote {
                depth += 1;
            }
            node = child;
        }
        assert_eq!(depth, MAX_DEPTH);
        assert_eq!(tree.plain_text(), "deep");
    }
}
