//! `[site]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [site]
//! url = "https://example.github.io"   # origin used for absolute URLs
//! base = "/my-project/"               # path the site is served under
//! trailing_slash = "always"           # always | never | ignore
//! title = "My Blog"
//! description = "Notes"
//! ```

use serde::{Deserialize, Serialize};

use crate::config::util::extract_url_path;
use crate::config::{ConfigDiagnostics, FieldPath};

/// How page URLs end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailingSlash {
    /// `/blog/post/`
    #[default]
    Always,
    /// `/blog/post`
    Never,
    /// Either form is accepted; links use the directory form.
    Ignore,
}

const DEFAULT_TITLE: &str = "Blog";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Site origin, e.g. `https://example.com`.
    pub url: Option<String>,

    /// Base path. Falls back to the path of `url`, then `/`.
    pub base: Option<String>,

    pub trailing_slash: TrailingSlash,

    pub title: String,

    pub description: String,
}

/// Field paths of `[site]`.
pub struct SiteFields {
    pub url: FieldPath,
    pub base: FieldPath,
    pub title: FieldPath,
}

impl SiteSectionConfig {
    pub const FIELDS: SiteFields = SiteFields {
        url: FieldPath::new("site.url"),
        base: FieldPath::new("site.base"),
        title: FieldPath::new("site.title"),
    };

    /// Title shown in page titles and the header, `"Blog"` when unset.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            DEFAULT_TITLE
        } else {
            &self.title
        }
    }

    /// Normalized base path: leading and trailing `/`, e.g. `/`, `/docs/`.
    pub fn base_path(&self) -> String {
        let raw = match &self.base {
            Some(base) => base.clone(),
            None => self
                .url
                .as_deref()
                .and_then(extract_url_path)
                .unwrap_or_default(),
        };
        normalize_base(&raw)
    }

    /// Origin without trailing slash or path, e.g. `https://example.com`.
    pub fn origin(&self) -> Option<String> {
        let parsed = url::Url::parse(self.url.as_deref()?).ok()?;
        Some(parsed.origin().ascii_serialization())
    }

    /// Validate site configuration.
    ///
    /// # Checks
    /// - If `sitemap_enabled`, `url` must be set
    /// - `url` must be an http(s) URL with a host
    /// - `base` must be a plain path
    pub fn validate(&self, sitemap_enabled: bool, diag: &mut ConfigDiagnostics) {
        if sitemap_enabled && self.url.is_none() {
            diag.error_with_hint(
                Self::FIELDS.url,
                format!(
                    "{} is enabled but {} is not configured",
                    FieldPath::new("integrations.sitemap"),
                    Self::FIELDS.url
                ),
                format!("set {}, e.g.: \"https://example.com\"", Self::FIELDS.url),
            );
        }

        if let Some(url_str) = &self.url {
            match url::Url::parse(url_str) {
                Ok(parsed) => {
                    if !matches!(parsed.scheme(), "http" | "https") {
                        diag.error_with_hint(
                            Self::FIELDS.url,
                            format!(
                                "scheme '{}' not supported, must be http or https",
                                parsed.scheme()
                            ),
                            "use format like https://example.com",
                        );
                    }
                    if parsed.host_str().is_none() {
                        diag.error_with_hint(
                            Self::FIELDS.url,
                            "URL must have a valid host",
                            "use format like https://example.com",
                        );
                    }
                }
                Err(e) => {
                    diag.error_with_hint(
                        Self::FIELDS.url,
                        format!("invalid URL: {e}"),
                        "use format like https://example.com",
                    );
                }
            }
        }

        if let Some(base) = &self.base
            && (base.contains("://") || base.contains(['?', '#', '\\']))
        {
            diag.error_with_hint(
                Self::FIELDS.base,
                format!("'{base}' is not a path"),
                "use a path like \"/my-project/\"; put the origin in `site.url`",
            );
        }

        if self.title.is_empty() {
            diag.warn(
                Self::FIELDS.title,
                format!("not set, pages are titled \"{DEFAULT_TITLE}\""),
            );
        }
    }
}

/// `docs` -> `/docs/`, `/a//b` -> `/a/b/`, `` -> `/`.
fn normalize_base(raw: &str) -> String {
    let mut out = String::from("/");
    for segment in raw.split('/').filter(|s| !s.is_empty()) {
        out.push_str(segment);
        out.push('/');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.site.url, None);
        assert_eq!(config.site.trailing_slash, TrailingSlash::Always);
        assert_eq!(config.site.base_path(), "/");
        assert_eq!(config.site.origin(), None);
    }

    #[test]
    fn test_trailing_slash_values() {
        for (value, expected) in [
            ("always", TrailingSlash::Always),
            ("never", TrailingSlash::Never),
            ("ignore", TrailingSlash::Ignore),
        ] {
            let config = test_parse_config(&format!("[site]\ntrailing_slash = \"{value}\""));
            assert_eq!(config.site.trailing_slash, expected);
        }
        assert!(crate::config::SiteConfig::from_str("[site]\ntrailing_slash = \"sometimes\"").is_err());
    }

    #[test]
    fn test_base_path() {
        let config = test_parse_config(
            "[site]\nurl = \"https://locdinh209.github.io\"\nbase = \"/Harry-the-architect/\"",
        );
        assert_eq!(config.site.base_path(), "/Harry-the-architect/");
        assert_eq!(config.site.origin().as_deref(), Some("https://locdinh209.github.io"));

        let config = test_parse_config("[site]\nbase = \"docs\"");
        assert_eq!(config.site.base_path(), "/docs/");

        // Derived from the URL path when no base is given
        let config = test_parse_config("[site]\nurl = \"https://example.github.io/project\"");
        assert_eq!(config.site.base_path(), "/project/");
        assert_eq!(config.site.origin().as_deref(), Some("https://example.github.io"));
    }

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base(""), "/");
        assert_eq!(normalize_base("/"), "/");
        assert_eq!(normalize_base("/a//b"), "/a/b/");
    }

    #[test]
    fn test_validate_url() {
        let mut diag = ConfigDiagnostics::new();
        let site = SiteSectionConfig {
            url: Some("ftp://example.com".into()),
            title: "t".into(),
            ..Default::default()
        };
        site.validate(false, &mut diag);
        assert_eq!(diag.len(), 1);

        let mut diag = ConfigDiagnostics::new();
        let site = SiteSectionConfig {
            url: Some("not a url".into()),
            title: "t".into(),
            ..Default::default()
        };
        site.validate(false, &mut diag);
        assert_eq!(diag.len(), 1);
    }

    #[test]
    fn test_validate_sitemap_requires_url() {
        let mut diag = ConfigDiagnostics::new();
        SiteSectionConfig::default().validate(true, &mut diag);
        assert_eq!(diag.errors()[0].field, SiteSectionConfig::FIELDS.url);
        // Missing title is only a warning
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.warnings().len(), 1);
    }

    #[test]
    fn test_title_fallback_matches_warning() {
        let site = SiteSectionConfig::default();
        let mut diag = ConfigDiagnostics::new();
        site.validate(false, &mut diag);

        let (field, message) = &diag.warnings()[0];
        assert_eq!(*field, SiteSectionConfig::FIELDS.title);
        assert!(message.contains(&format!("\"{}\"", site.display_title())));
        assert_eq!(site.display_title(), "Blog");

        let site = SiteSectionConfig {
            title: "Notes".into(),
            ..Default::default()
        };
        assert_eq!(site.display_title(), "Notes");
    }

    #[test]
    fn test_validate_base() {
        let mut diag = ConfigDiagnostics::new();
        let site = SiteSectionConfig {
            base: Some("https://example.com/docs".into()),
            title: "t".into(),
            ..Default::default()
        };
        site.validate(false, &mut diag);
        assert_eq!(diag.errors()[0].field, SiteSectionConfig::FIELDS.base);
    }
}
