//! Markdown tree transforms.
//!
//! A transform receives the whole syntax tree of one document and mutates it
//! in place. Transforms run after parsing and before rendering, in the order
//! listed under `[markdown] transforms` in the site config.
//!
//! # Built-in transforms
//!
//! | Name      | Effect                                              |
//! |-----------|-----------------------------------------------------|
//! | `mermaid` | `mermaid` code blocks → `<div class="mermaid">` html |

mod mermaid;

use std::fmt;

use super::tree::Node;

pub use mermaid::{MERMAID_LANG, MermaidRewriter, contains_diagram, rewrite_mermaid};

/// Names accepted in `[markdown] transforms`.
pub const BUILTIN_TRANSFORMS: &[&str] = &[MERMAID_LANG];

/// In-place transform over a markdown syntax tree.
pub trait TreeTransform: Send + Sync {
    /// Name used in logs and config.
    fn name(&self) -> &str;

    fn apply(&self, root: &mut Node);
}

/// Adapter turning a closure into a named transform.
pub struct FnTransform<F> {
    name: String,
    f: F,
}

impl<F> FnTransform<F>
where
    F: Fn(&mut Node) + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> TreeTransform for FnTransform<F>
where
    F: Fn(&mut Node) + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, root: &mut Node) {
        (self.f)(root);
    }
}

/// Look up a built-in transform by its config name.
pub fn builtin(name: &str) -> Option<Box<dyn TreeTransform>> {
    match name {
        MERMAID_LANG => Some(Box::new(MermaidRewriter)),
        _ => None,
    }
}

/// Transform name that is not a built-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTransform(pub String);

impl fmt::Display for UnknownTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown markdown transform `{}`", self.0)
    }
}

impl std::error::Error for UnknownTransform {}

/// Ordered list of transforms applied to every document.
#[derive(Default)]
pub struct TransformChain {
    transforms: Vec<Box<dyn TreeTransform>>,
}

impl TransformChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a chain from config names, keeping their order.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, UnknownTransform> {
        let transforms = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                builtin(name).ok_or_else(|| UnknownTransform(name.to_string()))
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { transforms })
    }

    /// Append a transform at the end of the chain.
    pub fn with(mut self, transform: impl TreeTransform + 'static) -> Self {
        self.transforms.push(Box::new(transform));
        self
    }

    pub fn apply(&self, root: &mut Node) {
        for transform in &self.transforms {
            transform.apply(root);
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.transforms.iter().map(|t| t.name())
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

impl fmt::Debug for TransformChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::tree::{NodeKind, Tag};
    use crate::markdown::visit::visit_mut;

    #[test]
    fn test_from_names() {
        let chain = TransformChain::from_names(&["mermaid"]).unwrap();
        assert_eq!(chain.names().collect::<Vec<_>>(), ["mermaid"]);

        let empty = TransformChain::from_names::<&str>(&[]).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_unknown_name() {
        let err = TransformChain::from_names(&["mermaid", "katex"]).unwrap_err();
        assert_eq!(err, UnknownTransform("katex".into()));
        assert!(err.to_string().contains("katex"));
    }

    #[test]
    fn test_chain_order() {
        // Tag every code block as mermaid, then rewrite: both blocks end up html.
        let tag_all = FnTransform::new("tag-all", |root: &mut Node| {
            visit_mut(root, Tag::Code, |node| {
                node.kind = NodeKind::Code {
                    lang: Some("mermaid".into()),
                    meta: None,
                };
            });
        });
        let chain = TransformChain::new().with(tag_all).with(MermaidRewriter);

        let mut tree = Node::root(vec![Node::code(None, "a"), Node::code(Some("js"), "b")]);
        chain.apply(&mut tree);
        assert!(tree.children.iter().all(|n| n.tag() == Tag::Html));
        assert_eq!(format!("{chain:?}"), r#"["tag-all", "mermaid"]"#);
    }

    #[test]
    fn test_builtins_resolve() {
        for name in BUILTIN_TRANSFORMS {
            assert_eq!(builtin(name).map(|t| t.name().to_string()).as_deref(), Some(*name));
        }
    }
}
