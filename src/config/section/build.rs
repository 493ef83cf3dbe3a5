//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! content = "src/content"   # collection root (relative to site root)
//! output = "dist"           # generated site (relative to site root)
//! clean = false             # empty the output directory first
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Content root; the `blog` collection lives in `{content}/blog`.
    pub content: PathBuf,

    /// Build output directory.
    pub output: PathBuf,

    /// Clean output directory before building (`--clean` also sets it).
    pub clean: bool,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            content: "src/content".into(),
            output: "dist".into(),
            clean: false,
        }
    }
}

pub struct BuildFields {
    pub content: FieldPath,
    pub output: FieldPath,
}

impl BuildSectionConfig {
    pub const FIELDS: BuildFields = BuildFields {
        content: FieldPath::new("build.content"),
        output: FieldPath::new("build.output"),
    };

    /// Resolve relative directories against the site root.
    pub fn resolve(&mut self, root: &Path) {
        self.content = root.join(&self.content);
        self.output = root.join(&self.output);
    }

    /// Validate resolved paths.
    ///
    /// # Checks
    /// - `content` must exist
    /// - `output` must not be `content` or contain it (cleaning would delete sources)
    pub fn validate(&self, root: &Path, diag: &mut ConfigDiagnostics) {
        if !self.content.is_dir() {
            diag.error_with_hint(
                Self::FIELDS.content,
                format!("directory '{}' not found", self.content.display()),
                "create it or point `build.content` at your content root",
            );
        }

        if self.output == root || self.content.starts_with(&self.output) {
            diag.error(
                Self::FIELDS.output,
                format!(
                    "'{}' contains the sources, cleaning it would delete them",
                    self.output.display()
                ),
            );
        }
    }
}
