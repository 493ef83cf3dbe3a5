//! Blog index page: every post, newest first.

use anyhow::Result;
use std::fmt::Write;

use super::page::post_permalink;
use super::{PageParts, PageRecord, canonical_link, render_layout, write_page};
use crate::config::SiteConfig;
use crate::content::{COLLECTION, Collection};
use crate::route::Permalink;
use crate::utils::html::{escape, escape_attr};

/// URL of the blog index.
pub fn index_permalink(config: &SiteConfig) -> Permalink {
    Permalink::new(
        &config.site.base_path(),
        &[COLLECTION],
        config.site.trailing_slash,
    )
}

/// Render and write the index.
///
/// `lastmod` is the most recent modification across all posts.
pub fn write_index(config: &SiteConfig, collection: &Collection) -> Result<PageRecord> {
    let permalink = index_permalink(config);
    let html = render_index(config, collection, &permalink);

    write_page(&permalink.output_file(&config.build.output), &html)?;

    Ok(PageRecord {
        permalink,
        lastmod: collection.iter().map(|e| e.data.last_modified()).max(),
    })
}

pub fn render_index(config: &SiteConfig, collection: &Collection, permalink: &Permalink) -> String {
    let mut main = String::from("<h1>Blog</h1>\n");

    if collection.is_empty() {
        main.push_str("<p>No posts yet.</p>\n");
    } else {
        main.push_str("<ul class=\"posts\">\n");
        // Collection is already sorted newest first
        for entry in collection.iter() {
            let data = &entry.data;
            let _ = write!(
                main,
                "<li>\n<a href=\"{}\">{}</a>\n<time datetime=\"{}\">{}</time>\n<p class=\"description\">{}</p>\n</li>\n",
                escape_attr(post_permalink(config, &entry.slug).as_str()),
                escape(&data.title),
                data.pub_date.to_rfc3339(),
                data.pub_date.to_display(),
                escape(&data.description),
            );
        }
        main.push_str("</ul>\n");
    }

    render_layout(
        config,
        PageParts {
            title: "Blog".into(),
            description: config.site.description.clone(),
            head: canonical_link(config, permalink),
            main,
            scripts: String::new(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::utils::date::DateTimeUtc;
    use std::fs;
    use tempfile::TempDir;

    fn write_post(dir: &std::path::Path, name: &str, title: &str, date: &str) {
        fs::write(
            dir.join(name),
            format!("---\ntitle: {title}\ndescription: about {title}\npubDate: {date}\n---\nbody\n"),
        )
        .unwrap();
    }

    fn setup(config_toml: &str) -> (TempDir, SiteConfig, Collection) {
        let dir = TempDir::new().unwrap();
        let mut config = test_parse_config(config_toml);
        config.set_root(dir.path());

        let blog = config.collection_dir();
        fs::create_dir_all(&blog).unwrap();
        write_post(&blog, "older.md", "Older", "2023-03-01");
        write_post(&blog, "newer.md", "Newer", "2024-06-15");

        let collection = Collection::load(&blog, true).unwrap();
        (dir, config, collection)
    }

    #[test]
    fn test_index_permalink() {
        let config = test_parse_config("");
        assert_eq!(index_permalink(&config).as_str(), "/blog/");

        let config = test_parse_config("[site]\nbase = \"/docs\"\ntrailing_slash = \"never\"");
        assert_eq!(index_permalink(&config).as_str(), "/docs/blog");
    }

    #[test]
    fn test_render_index_newest_first() {
        let (_dir, config, collection) = setup("[site]\nbase = \"/docs/\"");
        let html = render_index(&config, &collection, &index_permalink(&config));

        let newer = html.find("<a href=\"/docs/blog/newer/\">Newer</a>").unwrap();
        let older = html.find("<a href=\"/docs/blog/older/\">Older</a>").unwrap();
        assert!(newer < older);
        assert!(html.contains("<time datetime=\"2024-06-15T00:00:00Z\">Jun 15, 2024</time>"));
        assert!(html.contains("<title>Blog</title>"));
    }

    #[test]
    fn test_write_index() {
        let (dir, config, collection) = setup("");
        let record = write_index(&config, &collection).unwrap();

        assert_eq!(record.permalink.as_str(), "/blog/");
        assert_eq!(record.lastmod, Some(DateTimeUtc::from_ymd(2024, 6, 15)));
        assert!(dir.path().join("dist/blog/index.html").is_file());
    }

    #[test]
    fn test_render_index_empty() {
        let config = test_parse_config("");
        let html = render_index(&config, &Collection::default(), &index_permalink(&config));
        assert!(html.contains("<p>No posts yet.</p>"));
        assert!(!html.contains("<ul class=\"posts\">"));
    }
}
