//! Site output generators.
//!
//! - **Post pages**: one HTML page per blog entry (`page`)
//! - **Blog index**: every post, newest first (`index`)
//! - **Sitemap**: search engine indexing (`sitemap.xml`)
//!
//! Pages report a [`PageRecord`] so the sitemap is built from what was
//! actually written, without another scan of the output directory.

pub mod index;
pub mod page;
pub mod sitemap;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;
use crate::embed::layout::{LAYOUT_HTML, LayoutVars};
use crate::route::Permalink;
use crate::utils::date::DateTimeUtc;
use crate::utils::html::escape;

/// A page written to the output directory.
#[derive(Debug, Clone)]
pub struct PageRecord {
    pub permalink: Permalink,
    /// Last modification, for the sitemap `<lastmod>`.
    pub lastmod: Option<DateTimeUtc>,
}

/// Page-specific parts of the layout.
#[derive(Debug, Default)]
pub struct PageParts {
    pub title: String,
    pub description: String,
    pub head: String,
    pub main: String,
    pub scripts: String,
}

/// Render `parts` into the site layout.
pub fn render_layout(config: &SiteConfig, parts: PageParts) -> String {
    let site_title = config.site.display_title();
    let title = if parts.title.is_empty() || parts.title == site_title {
        site_title.to_string()
    } else {
        format!("{} | {site_title}", parts.title)
    };

    LAYOUT_HTML.render(&LayoutVars {
        title: escape(&title).into_owned(),
        description: escape(&parts.description).into_owned(),
        site_title: escape(site_title).into_owned(),
        site_description: escape(&config.site.description).into_owned(),
        home: escape(index::index_permalink(config).as_str()).into_owned(),
        head: parts.head,
        main: parts.main,
        scripts: parts.scripts,
    })
}

/// Canonical link tag, when the site origin is known.
pub fn canonical_link(config: &SiteConfig, permalink: &Permalink) -> String {
    match config.site.origin() {
        Some(origin) => format!(
            "<link rel=\"canonical\" href=\"{}\">\n",
            escape(&permalink.to_absolute(&origin))
        ),
        None => String::new(),
    }
}

/// Write a page, creating parent directories.
pub fn write_page(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))
}
