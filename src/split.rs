//! Carving a merge tree into groups of requested sizes.
//!
//! One LIFO stack, seeded with the root, is shared by every group of a
//! request. Filling a group of size `k` pops until `k` leaves are collected:
//!
//! - a leaf joins the current group;
//! - an internal node pushes its children so that the child with the higher
//!   merge height is popped next (see [`MergeTree::ordered_children`]).
//!
//! Whatever is left on the stack when a group fills is where the next group
//! starts. Each node is pushed and popped at most once per request, so a
//! request costs O(n).
//!
//! ```text
//!            8 (0.8)
//!           / \
//!   (0.1) 5    7 (0.5)          sizes [2, 3]
//!        / \  / \
//!       0  1 4   6 (0.2)        group 0: 3, 2
//!               / \             group 1: 4, 1, 0
//!              2   3
//! ```

use crate::error::{Error, Result};
use crate::hierarchy::{MergeTree, NodeContent};

/// Check that `sizes` partitions `n_items` into non-empty groups.
pub fn check_sizes(sizes: &[usize], n_items: usize) -> Result<()> {
    let invalid = |reason: String| Error::InvalidGroupSizes {
        sizes: sizes.to_vec(),
        n_items,
        reason,
    };

    if sizes.is_empty() {
        return Err(invalid("no groups requested".to_string()));
    }
    if let Some(pos) = sizes.iter().position(|&s| s == 0) {
        return Err(invalid(format!("group {pos} has size 0")));
    }
    let Some(total) = sizes.iter().try_fold(0usize, |acc, &s| acc.checked_add(s)) else {
        return Err(invalid("sizes overflow".to_string()));
    };
    if total != n_items {
        return Err(invalid(format!("sizes sum to {total}")));
    }
    Ok(())
}

/// Split the leaves of `tree` into groups of `sizes`, in order.
///
/// Returns participant indices per group. Nothing is returned unless every
/// group fills.
pub fn split_tree(tree: &MergeTree, sizes: &[usize]) -> Result<Vec<Vec<usize>>> {
    check_sizes(sizes, tree.n_leaves())?;

    let mut stack = vec![tree.root()];
    let mut groups = Vec::with_capacity(sizes.len());

    for (g, &target) in sizes.iter().enumerate() {
        let mut group = Vec::with_capacity(target);

        while group.len() < target {
            let Some(id) = stack.pop() else {
                break;
            };
            let node = tree
                .node(id)
                .ok_or_else(|| Error::InconsistentTree(format!("node {id} is not in the tree")))?;
            match node.content {
                NodeContent::Leaf(index) => group.push(index),
                NodeContent::Merge { .. } => {
                    let (first, second) = tree.ordered_children(id).ok_or_else(|| {
                        Error::InconsistentTree(format!("node {id} has no children"))
                    })?;
                    stack.push(second);
                    stack.push(first);
                }
            }
        }

        if group.len() != target {
            return Err(Error::InconsistentTree(format!(
                "ran out of nodes filling group {g}: {} of {target}",
                group.len()
            )));
        }
        tracing::trace!(group = g, size = target, pending = stack.len(), "group filled");
        groups.push(group);
    }

    Ok(groups)
}
