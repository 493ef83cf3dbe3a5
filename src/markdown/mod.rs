//! Markdown processing.
//!
//! ```text
//! source ──parse──▶ Node tree ──transforms──▶ Node tree ──render──▶ HTML
//! ```
//!
//! - [`tree`] - syntax tree types
//! - [`parse`] - markdown → tree via `pulldown-cmark`
//! - [`visit`] - pre-order walks filtered by node kind
//! - [`transform`] - in-place tree transforms (mermaid, ...)
//! - [`render`] - tree → HTML

pub mod parse;
pub mod render;
pub mod transform;
pub mod tree;
pub mod visit;

pub use parse::{MarkdownOptions, from_markdown};
pub use render::{RenderOptions, render_html};
pub use transform::{TransformChain, TreeTransform};
pub use tree::{Node, NodeKind, Tag};

/// Parse, transform and render one document.
#[derive(Debug)]
pub struct MarkdownProcessor {
    options: MarkdownOptions,
    transforms: TransformChain,
    render: RenderOptions,
}

/// Rendered document.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub html: String,
    /// Body contains at least one diagram for the client-side renderer.
    pub has_diagram: bool,
}

impl MarkdownProcessor {
    pub fn new(transforms: TransformChain, render: RenderOptions) -> Self {
        Self {
            options: MarkdownOptions::all(),
            transforms,
            render,
        }
    }

    /// Source → tree with all transforms applied.
    pub fn tree(&self, source: &str) -> Node {
        let mut tree = from_markdown(source, &self.options);
        self.transforms.apply(&mut tree);
        tree
    }

    pub fn process(&self, source: &str) -> Rendered {
        let tree = self.tree(source);
        let html = render_html(&tree, &self.render);
        Rendered {
            has_diagram: transform::contains_diagram(&html),
            html,
        }
    }
}
