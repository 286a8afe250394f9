//! Merge tree built from a dendrogram.

use super::dendrogram::Dendrogram;
use super::node::Node;
use crate::error::{Error, Result};

/// A rooted binary tree stored as an arena.
///
/// Leaves occupy ids `0..n` and match distance-matrix indices. The node made
/// by merge step `i` has id `n + i`; the last one is the root. Every node but
/// the root has exactly one parent.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeTree {
    nodes: Vec<Node>,
    n_leaves: usize,
}

impl MergeTree {
    /// Build the tree from a complete merge history.
    ///
    /// Fails with [`Error::InconsistentTree`] when a step references an id
    /// that does not exist yet, merges a node twice, or the history does not
    /// end in a single root.
    pub fn from_dendrogram(dendro: &Dendrogram) -> Result<Self> {
        let n = dendro.n_items();
        if n == 0 {
            return Err(Error::EmptyInput);
        }
        if !dendro.is_complete() {
            return Err(Error::InconsistentTree(format!(
                "{} items need {} merges, found {}",
                n,
                n - 1,
                dendro.n_merges()
            )));
        }

        let mut nodes: Vec<Node> = (0..n).map(Node::leaf).collect();
        nodes.reserve(n - 1);

        for (step, merge) in dendro.merges().enumerate() {
            let id = n + step;
            if merge.left == merge.right {
                return Err(Error::InconsistentTree(format!(
                    "step {step} merges {} with itself",
                    merge.left
                )));
            }
            for child in [merge.left, merge.right] {
                if child >= id {
                    return Err(Error::InconsistentTree(format!(
                        "step {step} references {child} before it exists"
                    )));
                }
                if let Some(parent) = nodes[child].parent {
                    return Err(Error::InconsistentTree(format!(
                        "step {step} re-merges {child}, already under {parent}"
                    )));
                }
                nodes[child].parent = Some(id);
            }
            nodes.push(Node::internal(id, merge.left, merge.right, step, merge.height));
        }

        Ok(Self { nodes, n_leaves: n })
    }

    /// Assemble a tree without checking it.
    #[cfg(test)]
    pub(crate) fn from_parts_unchecked(nodes: Vec<Node>, n_leaves: usize) -> Self {
        Self { nodes, n_leaves }
    }

    /// Arena id of the root.
    pub fn root(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Node by arena id.
    pub fn node(&self, id: usize) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Merge height of `id` (0 for leaves and unknown ids).
    pub fn height(&self, id: usize) -> f64 {
        self.nodes.get(id).map_or(0.0, |n| n.height)
    }

    /// Children of `id` with the higher one first.
    ///
    /// "Higher" is by merge height. On equal heights the second recorded
    /// child comes first.
    pub fn ordered_children(&self, id: usize) -> Option<(usize, usize)> {
        let (left, right) = self.nodes.get(id)?.children()?;
        if self.height(left) > self.height(right) {
            Some((left, right))
        } else {
            Some((right, left))
        }
    }

    /// Participant indices under `id`, in partitioner visiting order.
    pub fn leaves_under(&self, id: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(top) = stack.pop() {
            let Some(node) = self.nodes.get(top) else {
                continue;
            };
            if let Some(index) = node.as_leaf() {
                out.push(index);
            } else if let Some((first, second)) = self.ordered_children(top) {
                stack.push(second);
                stack.push(first);
            }
        }
        out
    }

    /// Iterate over all nodes in arena order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Number of total nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena has no nodes (never true for a built tree).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of leaf nodes.
    pub fn n_leaves(&self) -> usize {
        self.n_leaves
    }
}
