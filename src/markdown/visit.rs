//! Pre-order tree walks.
//!
//! Both walks are iterative (explicit stack), so arbitrarily deep trees
//! never overflow the call stack. Nodes are visited in document order and
//! each node exactly once. Passing a [`Tag`] restricts the callback to nodes
//! of that kind; passing `None` visits every node.

use super::tree::{Node, Tag};

/// Walk `root` in pre-order, calling `f` on every node matching `filter`.
pub fn visit<'a>(root: &'a Node, filter: impl Into<Option<Tag>>, mut f: impl FnMut(&'a Node)) {
    let filter = filter.into();
    let mut stack: Vec<&'a Node> = vec![root];

    while let Some(node) = stack.pop() {
        if filter.is_none_or(|tag| node.tag() == tag) {
            f(node);
        }
        stack.extend(node.children.iter().rev());
    }
}

/// Walk `root` in pre-order, handing every node matching `filter` to `f`
/// for in-place mutation.
///
/// The kind check happens before `f` runs, and the children of a node are
/// scheduled after `f` returns, so `f` sees each node once and any children
/// it leaves in place are visited next.
pub fn visit_mut(root: &mut Node, filter: impl Into<Option<Tag>>, mut f: impl FnMut(&mut Node)) {
    let filter = filter.into();
    let mut stack: Vec<&mut Node> = vec![root];

    while let Some(node) = stack.pop() {
        if filter.is_none_or(|tag| node.tag() == tag) {
            f(node);
        }
        stack.extend(node.children.iter_mut().rev());
    }
}
