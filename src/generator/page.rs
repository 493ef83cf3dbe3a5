//! Blog post pages.
//!
//! ```text
//! {output}/blog/{slug}/index.html    trailing_slash = always | ignore
//! {output}/blog/{slug}.html          trailing_slash = never
//! ```

use anyhow::Result;
use serde_json::json;
use std::fmt::Write;

use super::{PageParts, PageRecord, canonical_link, render_layout, write_page};
use crate::config::SiteConfig;
use crate::content::{COLLECTION, Entry, FaqEntry};
use crate::markdown::{MarkdownProcessor, Rendered};
use crate::route::Permalink;
use crate::utils::date::DateTimeUtc;
use crate::utils::html::{escape, escape_attr, escape_script_json};

/// URL of a post.
pub fn post_permalink(config: &SiteConfig, slug: &str) -> Permalink {
    Permalink::new(
        &config.site.base_path(),
        &[COLLECTION, slug],
        config.site.trailing_slash,
    )
}

/// Render and write one post.
pub fn write_post(
    config: &SiteConfig,
    processor: &MarkdownProcessor,
    entry: &Entry,
) -> Result<PageRecord> {
    let permalink = post_permalink(config, &entry.slug);
    let body = processor.process(&entry.body);
    let html = render_post(config, entry, &permalink, &body);

    write_page(&permalink.output_file(&config.build.output), &html)?;

    Ok(PageRecord {
        permalink,
        lastmod: Some(entry.data.last_modified()),
    })
}

/// Full HTML page for a post.
pub fn render_post(
    config: &SiteConfig,
    entry: &Entry,
    permalink: &Permalink,
    body: &Rendered,
) -> String {
    let data = &entry.data;

    let mut head = canonical_link(config, permalink);
    if !data.faq().is_empty() {
        let _ = writeln!(
            head,
            "<script type=\"application/ld+json\">{}</script>",
            escape_script_json(&faq_json_ld(data.faq()).to_string())
        );
    }

    let mut scripts = String::new();
    if body.has_diagram {
        scripts.push_str(&mermaid_script(&config.markdown.mermaid_script));
    }

    render_layout(
        config,
        PageParts {
            title: data.title.clone(),
            description: data.description.clone(),
            head,
            main: article(config, entry, body),
            scripts,
        },
    )
}

fn article(config: &SiteConfig, entry: &Entry, body: &Rendered) -> String {
    let data = &entry.data;
    let mut out = String::with_capacity(body.html.len() + 1024);

    out.push_str("<article class=\"post\">\n");
    if let Some(hero) = &data.hero_image {
        let src = asset_url(&config.site.base_path(), hero);
        let _ = writeln!(
            out,
            "<img class=\"hero\" src=\"{}\" alt=\"\">",
            escape_attr(&src)
        );
    }
    let _ = writeln!(out, "<h1>{}</h1>", escape(&data.title));
    let _ = writeln!(out, "<p class=\"description\">{}</p>", escape(&data.description));

    out.push_str("<p class=\"dates\">");
    out.push_str(&time_tag(data.pub_date));
    if let Some(updated) = data.updated_date {
        out.push_str(" · Updated ");
        out.push_str(&time_tag(updated));
    }
    out.push_str("</p>\n");

    out.push_str("<div class=\"prose\">\n");
    out.push_str(&body.html);
    out.push_str("</div>\n");

    if !data.faq().is_empty() {
        out.push_str(&faq_section(data.faq()));
    }
    out.push_str("</article>");
    out
}

fn time_tag(date: DateTimeUtc) -> String {
    format!(
        "<time datetime=\"{}\">{}</time>",
        date.to_rfc3339(),
        date.to_display()
    )
}

fn faq_section(faq: &[FaqEntry]) -> String {
    let mut out = String::from("<section class=\"faq\">\n<h2 id=\"faq\">FAQ</h2>\n<dl>\n");
    for item in faq {
        let _ = writeln!(
            out,
            "<dt>{}</dt>\n<dd>{}</dd>",
            escape(&item.question),
            escape(&item.answer)
        );
    }
    out.push_str("</dl>\n</section>\n");
    out
}

/// schema.org `FAQPage` structured data.
pub fn faq_json_ld(faq: &[FaqEntry]) -> serde_json::Value {
    let questions: Vec<_> = faq
        .iter()
        .map(|item| {
            json!({
                "@type": "Question",
                "name": item.question,
                "acceptedAnswer": {
                    "@type": "Answer",
                    "text": item.answer,
                },
            })
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "FAQPage",
        "mainEntity": questions,
    })
}

/// Module script rendering every `div.mermaid` on load.
fn mermaid_script(src: &str) -> String {
    let src = serde_json::to_string(src).unwrap_or_else(|_| "\"\"".into());
    format!(
        "<script type=\"module\">\nimport mermaid from {};\nmermaid.initialize({{ startOnLoad: true }});\n</script>\n",
        escape_script_json(&src)
    )
}

/// Root-relative asset paths are served under the base path.
pub fn asset_url(base: &str, src: &str) -> String {
    if src.starts_with('/') && !src.starts_with("//") {
        format!("{}{}", base.trim_end_matches('/'), src)
    } else {
        src.to_string()
    }
}
