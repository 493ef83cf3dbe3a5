//! Configuration section definitions.
//!
//! Each module corresponds to a section in `quire.toml`:
//!
//! | Module         | TOML Section     | Purpose                                |
//! |----------------|------------------|----------------------------------------|
//! | `build`        | `[build]`        | Content and output directories         |
//! | `integrations` | `[integrations]` | `.mdx` loading, sitemap                |
//! | `markdown`     | `[markdown]`     | Highlight theme, tree transforms       |
//! | `site`         | `[site]`         | Origin, base path, trailing slashes    |

pub mod build;
pub mod integrations;
pub mod markdown;
pub mod site;

pub use build::BuildSectionConfig;
pub use integrations::IntegrationsConfig;
pub use markdown::MarkdownConfig;
pub use site::{SiteSectionConfig, TrailingSlash};
