//! Merge tree node.

use core::fmt;

/// A node in a [`MergeTree`](super::MergeTree) arena.
///
/// Leaves wrap one participant index; internal nodes wrap the arena ids of
/// their two children and the merge step that formed them.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Arena id: `0..n` for leaves, `n + step` for internal nodes.
    pub id: usize,
    /// What the node holds.
    pub content: NodeContent,
    /// Merge height (0 for leaves).
    pub height: f64,
    /// Parent arena id (`None` for the root).
    pub parent: Option<usize>,
}

/// Content of a merge tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeContent {
    /// Leaf holding a participant index.
    Leaf(usize),
    /// Internal node formed by merge step `cluster`.
    Merge {
        /// First recorded child.
        left: usize,
        /// Second recorded child.
        right: usize,
        /// Index of the merge step that formed this node.
        cluster: usize,
    },
}

impl Node {
    /// Create a leaf for participant `index`.
    pub fn leaf(index: usize) -> Self {
        Self {
            id: index,
            content: NodeContent::Leaf(index),
            height: 0.0,
            parent: None,
        }
    }

    /// Create an internal node.
    pub fn internal(id: usize, left: usize, right: usize, cluster: usize, height: f64) -> Self {
        Self {
            id,
            content: NodeContent::Merge {
                left,
                right,
                cluster,
            },
            height,
            parent: None,
        }
    }

    /// Check if this is a leaf node.
    pub fn is_leaf(&self) -> bool {
        matches!(self.content, NodeContent::Leaf(_))
    }

    /// Participant index if this is a leaf.
    pub fn as_leaf(&self) -> Option<usize> {
        match self.content {
            NodeContent::Leaf(index) => Some(index),
            NodeContent::Merge { .. } => None,
        }
    }

    /// Children `(left, right)` if this is an internal node.
    pub fn children(&self) -> Option<(usize, usize)> {
        match self.content {
            NodeContent::Merge { left, right, .. } => Some((left, right)),
            NodeContent::Leaf(_) => None,
        }
    }

    /// Merge step index if this is an internal node.
    pub fn cluster(&self) -> Option<usize> {
        match self.content {
            NodeContent::Merge { cluster, .. } => Some(cluster),
            NodeContent::Leaf(_) => None,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.content {
            NodeContent::Leaf(index) => write!(f, "Leaf[{}]: participant {}", self.id, index),
            NodeContent::Merge { cluster, .. } => {
                write!(f, "Node[{}] cluster {}: {:.2}", self.id, cluster, self.height)
            }
        }
    }
}
