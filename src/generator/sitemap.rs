//! Sitemap generation.
//!
//! Generates a sitemap.xml file listing all pages for search engine indexing.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/base/blog/hello/</loc>
//!     <lastmod>2025-01-01</lastmod>
//!   </url>
//! </urlset>
//! ```

use super::PageRecord;
use crate::{config::SiteConfig, log};
use anyhow::{Context, Result};
use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const SITEMAP_FILE: &str = "sitemap.xml";

/// Build sitemap if enabled.
///
/// Config validation guarantees a site URL whenever the sitemap is enabled;
/// without one there is no origin for `<loc>` and nothing is written.
pub fn build_sitemap(config: &SiteConfig, pages: &[PageRecord]) -> Result<()> {
    if !config.integrations.sitemap {
        return Ok(());
    }
    let Some(origin) = config.site.origin() else {
        log!("sitemap"; "skipped, no site url");
        return Ok(());
    };

    Sitemap::build(&origin, pages).write(config)
}

/// Location of `sitemap.xml`, at the output root.
pub fn sitemap_path(config: &SiteConfig) -> PathBuf {
    config.build.output.join(SITEMAP_FILE)
}

struct Sitemap {
    urls: Vec<UrlEntry>,
}

struct UrlEntry {
    loc: String,
    lastmod: Option<String>,
}

impl Sitemap {
    fn build(origin: &str, pages: &[PageRecord]) -> Self {
        let mut urls: Vec<UrlEntry> = pages
            .iter()
            .map(|page| UrlEntry {
                loc: page.permalink.to_absolute(origin),
                lastmod: page.lastmod.map(|d| d.to_w3c()),
            })
            .collect();
        urls.sort_by(|a, b| a.loc.cmp(&b.loc));

        Self { urls }
    }

    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<urlset xmlns=\"");
        xml.push_str(SITEMAP_NS);
        xml.push_str("\">\n");

        for entry in self.urls {
            xml.push_str("  <url>\n    <loc>");
            xml.push_str(&escape_xml(&entry.loc));
            xml.push_str("</loc>\n");
            if let Some(lastmod) = entry.lastmod {
                xml.push_str("    <lastmod>");
                xml.push_str(&lastmod);
                xml.push_str("</lastmod>\n");
            }
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    fn write(self, config: &SiteConfig) -> Result<()> {
        let sitemap_path = sitemap_path(config);
        let count = self.urls.len();
        let xml = self.into_xml();

        if let Some(parent) = sitemap_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(&sitemap_path, xml)
            .with_context(|| format!("Failed to write sitemap to {}", sitemap_path.display()))?;

        log!("sitemap"; "{} ({} urls)", config.root_relative(&sitemap_path).display(), count);
        Ok(())
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> Cow<'_, str> {
    // Fast path: check if escaping is needed
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TrailingSlash, test_parse_config};
    use crate::route::Permalink;
    use crate::utils::date::DateTimeUtc;
    use tempfile::TempDir;

    fn record(segments: &[&str], lastmod: Option<DateTimeUtc>) -> PageRecord {
        PageRecord {
            permalink: Permalink::new("/Harry-the-architect/", segments, TrailingSlash::Always),
            lastmod,
        }
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("hello"), "hello");
        assert_eq!(escape_xml("<test>"), "&lt;test&gt;");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml(r#"say "hi""#), "say &quot;hi&quot;");
        assert_eq!(escape_xml("it's"), "it&apos;s");
    }

    #[test]
    fn test_sitemap_empty() {
        let xml = Sitemap { urls: vec![] }.into_xml();

        assert!(xml.contains(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#)));
        assert!(xml.contains("</urlset>"));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn test_sitemap_from_pages() {
        let pages = [
            record(&["blog"], Some(DateTimeUtc::from_ymd(2024, 6, 15))),
            record(&["blog", "hello"], Some(DateTimeUtc::new(2024, 6, 15, 10, 30, 0))),
            record(&["blog", "draft"], None),
        ];
        let xml = Sitemap::build("https://locdinh209.github.io", &pages).into_xml();

        assert!(xml.contains("<loc>https://locdinh209.github.io/Harry-the-architect/blog/</loc>\n    <lastmod>2024-06-15</lastmod>"));
        assert!(xml.contains("<loc>https://locdinh209.github.io/Harry-the-architect/blog/hello/</loc>\n    <lastmod>2024-06-15T10:30:00Z</lastmod>"));
        assert!(xml.contains("<loc>https://locdinh209.github.io/Harry-the-architect/blog/draft/</loc>\n  </url>"));
        assert_eq!(xml.matches("<url>").count(), 3);
    }

    #[test]
    fn test_sitemap_encodes_segments() {
        let pages = [record(&["blog", "a b&c"], None)];
        let xml = Sitemap::build("https://example.com", &pages).into_xml();
        assert!(xml.contains("<loc>https://example.com/Harry-the-architect/blog/a%20b%26c/</loc>"));
    }

    #[test]
    fn test_sitemap_xml_structure() {
        let xml = Sitemap::build("https://example.com", &[record(&["blog"], None)]).into_xml();

        let lines: Vec<&str> = xml.lines().collect();
        assert_eq!(lines[0], r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        assert!(lines[1].starts_with("<urlset"));
        assert!(lines.last().unwrap().trim() == "</urlset>");
    }

    #[test]
    fn test_build_sitemap_writes_at_output_root() {
        let dir = TempDir::new().unwrap();
        let mut config = test_parse_config(
            "[site]\nurl = \"https://example.com\"\nbase = \"/Harry-the-architect/\"",
        );
        config.set_root(dir.path());

        build_sitemap(&config, &[record(&["blog"], None)]).unwrap();

        let path = dir.path().join("dist/sitemap.xml");
        assert_eq!(sitemap_path(&config), path);
        let xml = fs::read_to_string(path).unwrap();
        assert!(xml.contains("<loc>https://example.com/Harry-the-architect/blog/</loc>"));
    }

    #[test]
    fn test_build_sitemap_disabled() {
        let dir = TempDir::new().unwrap();
        let mut config = test_parse_config(
            "[site]\nurl = \"https://example.com\"\n[integrations]\nsitemap = false",
        );
        config.set_root(dir.path());

        build_sitemap(&config, &[record(&["blog"], None)]).unwrap();
        assert!(!sitemap_path(&config).exists());
    }
}
