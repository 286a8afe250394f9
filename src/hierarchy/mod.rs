//! Merge history and the binary tree built from it.
//!
//! ## [`Dendrogram`] - Merge History
//!
//! Records every merge of an agglomerative run as `(left, right, height,
//! size)`, using SciPy-style labels: leaves `0..n`, merge `i` creates
//! cluster `n + i`.
//!
//! ## [`MergeTree`] - Arena Tree
//!
//! The same information as a rooted binary tree:
//!
//! ```text
//!         6 (height=0.9)
//!        / \
//!       4   5 (height=0.3)
//!      / \ / \
//!     0  1 2  3 (leaves)
//! ```
//!
//! Nodes are addressed by their dendrogram label, so there are no pointers
//! to chase and the tree can be shared read-only across callers.

mod dendrogram;
mod node;
mod tree;

pub use dendrogram::{Dendrogram, MergeStep};
pub use node::{Node, NodeContent};
pub use tree::MergeTree;
