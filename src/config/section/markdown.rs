//! `[markdown]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [markdown]
//! theme = "github-dark"     # syntax highlight theme
//! transforms = ["mermaid"]  # tree transforms, applied in order
//! mermaid_script = "https://cdn.jsdelivr.net/npm/mermaid@10/dist/mermaid.esm.min.mjs"
//! ```

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::markdown::transform::{BUILTIN_TRANSFORMS, MERMAID_LANG, TransformChain};

/// Highlight themes known to the page stylesheet.
pub const THEMES: &[&str] = &[
    "github-dark",
    "github-dark-dimmed",
    "github-light",
    "dracula",
    "monokai",
    "nord",
    "one-dark-pro",
    "solarized-dark",
    "solarized-light",
    "vitesse-dark",
    "vitesse-light",
];

pub const DEFAULT_MERMAID_SCRIPT: &str =
    "https://cdn.jsdelivr.net/npm/mermaid@10/dist/mermaid.esm.min.mjs";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Syntax highlight theme for code blocks.
    pub theme: String,

    /// Tree transforms by name. An empty list renders plain markdown.
    pub transforms: Vec<String>,

    /// ES module that renders `div.mermaid` elements in the browser.
    pub mermaid_script: String,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            theme: "github-dark".into(),
            transforms: vec![MERMAID_LANG.into()],
            mermaid_script: DEFAULT_MERMAID_SCRIPT.into(),
        }
    }
}

pub struct MarkdownFields {
    pub theme: FieldPath,
    pub transforms: FieldPath,
    pub mermaid_script: FieldPath,
}

impl MarkdownConfig {
    pub const FIELDS: MarkdownFields = MarkdownFields {
        theme: FieldPath::new("markdown.theme"),
        transforms: FieldPath::new("markdown.transforms"),
        mermaid_script: FieldPath::new("markdown.mermaid_script"),
    };

    /// Build the configured transform chain.
    ///
    /// Names are checked by [`validate`](Self::validate); an unknown name
    /// here is still reported as an error.
    pub fn transform_chain(&self) -> anyhow::Result<TransformChain> {
        Ok(TransformChain::from_names(&self.transforms)?)
    }

    pub fn uses_mermaid(&self) -> bool {
        self.transforms.iter().any(|t| t == MERMAID_LANG)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !THEMES.contains(&self.theme.as_str()) {
            diag.error_with_hint(
                Self::FIELDS.theme,
                format!("unknown theme '{}'", self.theme),
                format!("available themes: {}", THEMES.join(", ")),
            );
        }

        let mut seen = FxHashSet::default();
        for name in &self.transforms {
            if !BUILTIN_TRANSFORMS.contains(&name.as_str()) {
                diag.error_with_hint(
                    Self::FIELDS.transforms,
                    format!("unknown transform '{name}'"),
                    format!("available transforms: {}", BUILTIN_TRANSFORMS.join(", ")),
                );
            } else if !seen.insert(name.as_str()) {
                diag.warn(
                    Self::FIELDS.transforms,
                    format!("'{name}' is listed more than once"),
                );
            }
        }

        if self.uses_mermaid() && self.mermaid_script.trim().is_empty() {
            diag.error_with_hint(
                Self::FIELDS.mermaid_script,
                "the mermaid transform is enabled but no client script is set",
                format!("use \"{DEFAULT_MERMAID_SCRIPT}\""),
            );
        }
    }
}
