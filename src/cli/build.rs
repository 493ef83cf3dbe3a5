//! Site building orchestration.
//!
//! Build pipeline phases:
//! - **Init** - Clean output when requested
//! - **Load** - Read and validate the blog collection
//! - **Render** - Parallel post page generation
//! - **Index** - Blog index page
//! - **Sitemap** - `sitemap.xml` from every written page
//!
//! A content error halts the build before any page is written.

use crate::{
    config::SiteConfig,
    content::Collection,
    generator::{PageRecord, index::write_index, page::write_post, sitemap::build_sitemap},
    log,
    logger::ProgressLine,
    markdown::{MarkdownProcessor, RenderOptions},
    utils::plural_count,
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs;

/// Build the entire site.
///
/// Returns every page written, index last.
pub fn build_site(config: &SiteConfig, quiet: bool) -> Result<Vec<PageRecord>> {
    init_build(config)?;

    let collection = load_collection(config)?;
    let processor = create_processor(config)?;

    let progress = (!quiet).then(|| ProgressLine::new(&[("posts", collection.len())]));
    let mut pages = render_posts(config, &processor, &collection, progress.as_ref())?;
    if let Some(p) = progress {
        p.finish();
    }

    pages.push(write_index(config, &collection).context("Failed to write blog index")?);
    build_sitemap(config, &pages)?;

    if !quiet {
        log_build_result(config, &collection);
    }

    Ok(pages)
}

/// Clear the output directory when `build.clean` is set.
fn init_build(config: &SiteConfig) -> Result<()> {
    let output = &config.build.output;
    if config.build.clean && output.exists() {
        crate::debug!("build"; "cleaning {}", output.display());
        fs::remove_dir_all(output).with_context(|| {
            format!("Failed to clear output directory: {}", output.display())
        })?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

/// Load the blog collection, failing on any invalid entry.
pub fn load_collection(config: &SiteConfig) -> Result<Collection> {
    let dir = config.collection_dir();
    Collection::load(&dir, config.integrations.mdx).with_context(|| {
        format!(
            "Failed to load collection {}",
            config.root_relative(&dir).display()
        )
    })
}

/// Markdown processor for the configured transforms and theme.
pub fn create_processor(config: &SiteConfig) -> Result<MarkdownProcessor> {
    let chain = config.markdown.transform_chain()?;
    crate::debug_do! {
        let names: Vec<_> = chain.names().collect();
        crate::debug!("markdown"; "transforms: {:?}", names);
    }
    Ok(MarkdownProcessor::new(
        chain,
        RenderOptions {
            theme: config.markdown.theme.clone(),
        },
    ))
}

/// Render all posts in parallel.
fn render_posts(
    config: &SiteConfig,
    processor: &MarkdownProcessor,
    collection: &Collection,
    progress: Option<&ProgressLine>,
) -> Result<Vec<PageRecord>> {
    collection
        .entries
        .par_iter()
        .map(|entry| {
            let record = write_post(config, processor, entry)
                .with_context(|| format!("Failed to write post {}", entry.id))?;
            if let Some(p) = progress {
                p.inc("posts");
            }
            Ok(record)
        })
        .collect()
}

fn log_build_result(config: &SiteConfig, collection: &Collection) {
    if collection.is_empty() {
        log!("warn"; "no posts found in {}", config.root_relative(config.collection_dir()).display());
    }
    log!(
        "build";
        "done, {} in {}",
        plural_count(collection.len(), "post"),
        config.root_relative(&config.build.output).display()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use tempfile::TempDir;

    const POST: &str = "---
title: Hello
description: First post
pubDate: 2024-01-05
faq:
  - question: Why?
    answer: Because.
---
# Diagram

```mermaid
graph TD; A-->B;
```
";

    fn site(config_toml: &str) -> (TempDir, SiteConfig) {
        let dir = TempDir::new().unwrap();
        let blog = dir.path().join("src/content/blog");
        fs::create_dir_all(&blog).unwrap();
        fs::write(blog.join("hello.md"), POST).unwrap();
        fs::write(
            blog.join("second.mdx"),
            "---\ntitle: Second\ndescription: d\npubDate: 2024-03-01\n---\nText\n",
        )
        .unwrap();

        let mut config = test_parse_config(config_toml);
        config.set_root(dir.path());
        (dir, config)
    }

    #[test]
    fn test_build_site_end_to_end() {
        let (dir, config) = site(
            r#"
[site]
url = "https://locdinh209.github.io"
base = "/Harry-the-architect/"
"#,
        );

        let pages = build_site(&config, true).unwrap();
        assert_eq!(pages.len(), 3);

        let out = dir.path().join("dist");
        let post = fs::read_to_string(out.join("blog/hello/index.html")).unwrap();
        assert!(post.contains("<div class=\"mermaid\">graph TD; A-->B;</div>"));
        assert!(post.contains("mermaid.initialize"));
        assert!(post.contains("\"@type\":\"FAQPage\""));

        let second = fs::read_to_string(out.join("blog/second/index.html")).unwrap();
        assert!(!second.contains("mermaid.initialize"));

        let index = fs::read_to_string(out.join("blog/index.html")).unwrap();
        let second_pos = index.find("/Harry-the-architect/blog/second/").unwrap();
        let hello_pos = index.find("/Harry-the-architect/blog/hello/").unwrap();
        assert!(second_pos < hello_pos);

        let sitemap = fs::read_to_string(out.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains(
            "<loc>https://locdinh209.github.io/Harry-the-architect/blog/hello/</loc>\n    <lastmod>2024-01-05</lastmod>"
        ));
        assert_eq!(sitemap.matches("<url>").count(), 3);
        assert!(!out.join("Harry-the-architect").exists());
    }

    #[test]
    fn test_build_without_mermaid_transform() {
        let (dir, config) = site(
            "[markdown]\ntransforms = []\n[integrations]\nsitemap = false\nmdx = false",
        );

        let pages = build_site(&config, true).unwrap();
        assert_eq!(pages.len(), 2);

        let post = fs::read_to_string(dir.path().join("dist/blog/hello/index.html")).unwrap();
        assert!(post.contains("<code class=\"language-mermaid\">"));
        assert!(!post.contains("<div class=\"mermaid\">"));
        assert!(!dir.path().join("dist/blog/second").exists());
        assert!(!dir.path().join("dist/sitemap.xml").exists());
    }

    #[test]
    fn test_build_invalid_content_writes_nothing() {
        let (dir, config) = site("[integrations]\nsitemap = false");
        fs::write(
            dir.path().join("src/content/blog/broken.md"),
            "---\ndescription: no title\npubDate: 2024-01-01\n---\n",
        )
        .unwrap();

        let err = build_site(&config, true).unwrap_err();
        assert!(format!("{err:#}").contains("Required"));
        assert!(!dir.path().join("dist/blog").exists());
    }

    #[test]
    fn test_build_clean_removes_stale_files() {
        let (dir, mut config) = site("[integrations]\nsitemap = false");
        let stale = dir.path().join("dist/stale.html");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, "old").unwrap();

        config.build.clean = true;
        build_site(&config, true).unwrap();
        assert!(!stale.exists());
        assert!(dir.path().join("dist/blog/index.html").exists());
    }
}
