//! `[integrations]` section configuration.
//!
//! ```toml
//! [integrations]
//! mdx = true        # load `.mdx` files as markdown
//! sitemap = true    # write sitemap.xml
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationsConfig {
    pub mdx: bool,
    pub sitemap: bool,
}

impl Default for IntegrationsConfig {
    fn default() -> Self {
        Self {
            mdx: true,
            sitemap: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert!(config.integrations.mdx);
        assert!(config.integrations.sitemap);
    }

    #[test]
    fn test_disable() {
        let config = test_parse_config("[integrations]\nmdx = false\nsitemap = false");
        assert!(!config.integrations.mdx);
        assert!(!config.integrations.sitemap);
    }
}
