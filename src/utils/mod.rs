//! Shared helpers: dates, HTML escaping, slugs, pluralization.

pub mod date;
pub mod html;
mod plural;
pub mod slug;

pub use plural::{plural_count, plural_s};
