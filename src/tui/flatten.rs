//! Tree flattening for linear up/down navigation.
//!
//! The flattened order is a contract: pre-order over the root subtree,
//! then the cache subtree, then the slog subtree, each node emitted
//! before its children and children in stored order. The sequence is
//! rebuilt whenever the pool selection or the pool data changes; it is
//! never mutated in place.

use crate::pool::types::{Pool, VDev};

/// Flatten a pool's device trees into the canonical navigation order.
#[must_use]
pub fn flatten(pool: &Pool) -> Vec<&VDev> {
    let mut out = Vec::new();
    push_pre_order(&pool.root, &mut out);
    flatten_subtree(pool.cache.as_ref(), &mut out);
    flatten_subtree(pool.slog.as_ref(), &mut out);
    out
}

/// Append an optional subtree in pre-order; an absent subtree
/// contributes nothing.
pub fn flatten_subtree<'a>(node: Option<&'a VDev>, out: &mut Vec<&'a VDev>) {
    if let Some(node) = node {
        push_pre_order(node, out);
    }
}

fn push_pre_order<'a>(node: &'a VDev, out: &mut Vec<&'a VDev>) {
    out.push(node);
    for child in &node.children {
        push_pre_order(child, out);
    }
}

/// Position of the first node named `name` in a flattened sequence.
///
/// Used to resume navigation at the previously selected node; callers
/// fall back to index 0 when the name has disappeared after a refresh.
#[must_use]
pub fn locate(flattened: &[&VDev], name: &str) -> Option<usize> {
    flattened.iter().position(|vdev| vdev.name == name)
}
