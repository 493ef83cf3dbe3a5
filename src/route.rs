//! Page URLs and output locations.
//!
//! A [`Permalink`] is the decoded URL path of a page, base path included:
//!
//! | Policy   | `blog` + `hello`            | root  |
//! |----------|-----------------------------|-------|
//! | `always` | `/base/blog/hello/`         | `/base/` |
//! | `never`  | `/base/blog/hello`          | `/base`  |
//! | `ignore` | `/base/blog/hello/`         | `/base/` |
//!
//! Output files leave the base out: the output directory is what gets
//! served at the base path.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::TrailingSlash;

/// Characters escaped inside one path segment: everything but RFC 3986
/// unreserved characters.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Decoded URL path of a page.
///
/// Invariants:
/// - Always starts with `/`
/// - No empty segments
/// - Ends with `/` unless the policy is `never`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permalink {
    path: String,
    /// Segments after the base path, kept for output file placement.
    segments: Vec<String>,
    policy: TrailingSlash,
}

impl Permalink {
    /// Join `base` and `segments` under `policy`.
    ///
    /// Segments may themselves contain `/` (nested slugs).
    pub fn new<S: AsRef<str>>(base: &str, segments: &[S], policy: TrailingSlash) -> Self {
        let base = split_segments(base);
        let segments: Vec<String> = segments
            .iter()
            .flat_map(|s| split_segments(s.as_ref()))
            .collect();

        let mut path = String::from("/");
        path.push_str(
            &base
                .iter()
                .chain(&segments)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join("/"),
        );
        match policy {
            TrailingSlash::Always | TrailingSlash::Ignore => {
                if !path.ends_with('/') {
                    path.push('/');
                }
            }
            TrailingSlash::Never => {
                if path.len() > 1 && path.ends_with('/') {
                    path.pop();
                }
            }
        }

        Self {
            path,
            segments,
            policy,
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Percent-encoded form, each segment escaped separately.
    pub fn to_encoded(&self) -> String {
        self.path
            .split('/')
            .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Absolute URL under `origin` (e.g. `https://example.com`).
    pub fn to_absolute(&self, origin: &str) -> String {
        format!("{}{}", origin.trim_end_matches('/'), self.to_encoded())
    }

    /// HTML file this page is written to under `output`.
    ///
    /// Directory form (`.../hello/index.html`) unless the policy is `never`,
    /// which writes `.../hello.html`. The site root is always `index.html`.
    pub fn output_file(&self, output: &Path) -> PathBuf {
        let mut dir = output.to_path_buf();

        match (self.policy, self.segments.split_last()) {
            (_, None) => dir.join("index.html"),
            (TrailingSlash::Never, Some((last, parents))) => {
                dir.extend(parents);
                dir.join(format!("{last}.html"))
            }
            (_, Some(_)) => {
                dir.extend(&self.segments);
                dir.join("index.html")
            }
        }
    }
}

impl fmt::Display for Permalink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl AsRef<str> for Permalink {
    fn as_ref(&self) -> &str {
        &self.path
    }
}

fn split_segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
