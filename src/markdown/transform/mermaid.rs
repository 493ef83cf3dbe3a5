//! Mermaid diagram blocks (code → html).
//!
//! A fenced block tagged `mermaid` becomes a raw `<div class="mermaid">`
//! holding the diagram source, which the client-side mermaid script renders
//! after page load:
//!
//! ````text
//! ```mermaid              <div class="mermaid">graph TD; A-->B;</div>
//! graph TD; A-->B;   →
//! ```
//! ````
//!
//! Rewritten nodes are `html`, so a second pass finds nothing to do.

use super::TreeTransform;
use crate::markdown::tree::{Node, NodeKind, Tag};
use crate::markdown::visit::visit_mut;

/// Language tag that marks a diagram source block.
pub const MERMAID_LANG: &str = "mermaid";

const OPEN: &str = r#"<div class="mermaid">"#;
const CLOSE: &str = "</div>";

/// Rewrites every `mermaid` code node of the tree into raw markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct MermaidRewriter;

impl TreeTransform for MermaidRewriter {
    fn name(&self) -> &str {
        MERMAID_LANG
    }

    fn apply(&self, root: &mut Node) {
        rewrite_mermaid(root);
    }
}

/// Rewrite `mermaid` code nodes of `root` in place.
pub fn rewrite_mermaid(root: &mut Node) {
    visit_mut(root, Tag::Code, |node| {
        if node.kind.lang() == Some(MERMAID_LANG) {
            node.kind = NodeKind::Html;
            node.value = format!("{OPEN}{}{CLOSE}", node.value);
        }
    });
}

/// Whether rendered HTML contains a rewritten diagram.
pub fn contains_diagram(html: &str) -> bool {
    html.contains(OPEN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::tree::NodeKind;

    #[test]
    fn test_rewrites_mermaid_block() {
        let mut tree = Node::root(vec![Node::code(Some("mermaid"), "graph TD; A-->B;")]);
        rewrite_mermaid(&mut tree);

        let node = &tree.children[0];
        assert_eq!(node.tag(), Tag::Html);
        assert_eq!(node.value, "<div class=\"mermaid\">graph TD; A-->B;</div>");
    }

    #[test]
    fn test_other_languages_untouched() {
        let original = Node::root(vec![
            Node::code(Some("js"), "console.log(1)"),
            Node::code(None, "plain"),
            Node::code(Some("Mermaid"), "graph LR; X-->Y;"),
            Node::code(Some("mermaid-js"), "graph LR; X-->Y;"),
        ]);
        let mut tree = original.clone();
        rewrite_mermaid(&mut tree);
        assert_eq!(tree, original);
    }

    #[test]
    fn test_non_code_nodes_untouched() {
        // Text that merely looks like a mermaid block is not a code node.
        let original = Node::root(vec![
            Node::new(NodeKind::Paragraph).with_children(vec![Node::text("mermaid")]),
            Node::leaf(NodeKind::InlineCode, "graph TD;"),
            Node::html("<p>hi</p>"),
        ]);
        let mut tree = original.clone();
        rewrite_mermaid(&mut tree);
        assert_eq!(tree, original);
    }

    #[test]
    fn test_nested_blocks_in_document_order() {
        let mut tree = Node::root(vec![
            Node::code(Some("mermaid"), "a"),
            Node::new(NodeKind::List {
                ordered: false,
                start: None,
            })
            .with_children(vec![
                Node::new(NodeKind::ListItem { checked: None }).with_children(vec![
                    Node::new(NodeKind::Blockquote)
                        .with_children(vec![Node::code(Some("mermaid"), "b")]),
                ]),
            ]),
            Node::code(Some("rust"), "c"),
        ]);
        let before = tree.count();
        rewrite_mermaid(&mut tree);

        let mut html = Vec::new();
        crate::markdown::visit::visit(&tree, Tag::Html, |n| html.push(n.value.as_str()));
        assert_eq!(
            html,
            [
                r#"<div class="mermaid">a</div>"#,
                r#"<div class="mermaid">b</div>"#
            ]
        );
        assert_eq!(tree.count(), before);
        assert_eq!(tree.children[2], Node::code(Some("rust"), "c"));
    }

    #[test]
    fn test_idempotent() {
        let mut once = Node::root(vec![
            Node::code(Some("mermaid"), "graph TD; A-->B;"),
            Node::code(Some("py"), "print(1)"),
        ]);
        rewrite_mermaid(&mut once);
        let mut twice = once.clone();
        rewrite_mermaid(&mut twice);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_diagram() {
        let mut tree = Node::root(vec![Node::code(Some("mermaid"), "")]);
        MermaidRewriter.apply(&mut tree);
        assert_eq!(tree.children[0].value, r#"<div class="mermaid"></div>"#);
    }

    #[test]
    fn test_contains_diagram() {
        assert!(contains_diagram(r#"<p>x</p><div class="mermaid">a</div>"#));
        assert!(!contains_diagram("<pre><code class=\"language-mermaid\">"));
    }
}
