//! Config and content validation without writing output.

use anyhow::Result;

use super::build::{create_processor, load_collection};
use crate::config::SiteConfig;
use crate::generator::page::post_permalink;
use crate::utils::plural_count;
use crate::{debug, log};

/// Validate the site.
///
/// Config validation already ran while loading; this loads the collection
/// through the same schema the build uses and renders every body once so
/// the transform chain is exercised.
pub fn check_site(config: &SiteConfig) -> Result<CheckSummary> {
    let collection = load_collection(config)?;
    let processor = create_processor(config)?;

    let mut summary = CheckSummary {
        posts: collection.len(),
        ..Default::default()
    };

    for entry in collection.iter() {
        let rendered = processor.process(&entry.body);
        if rendered.has_diagram {
            summary.diagrams += 1;
        }
        summary.faq_entries += entry.data.faq().len();
        debug!("check"; "{} -> {}", entry.id, post_permalink(config, &entry.slug));
    }

    log!(
        "check";
        "ok, {} ({}, {})",
        plural_count(summary.posts, "post"),
        plural_count(summary.diagrams, "diagram"),
        plural_count(summary.faq_entries, "faq item")
    );
    Ok(summary)
}

/// Counts reported by [`check_site`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CheckSummary {
    pub posts: usize,
    /// Posts whose body renders at least one diagram.
    pub diagrams: usize,
    pub faq_entries: usize,
}
