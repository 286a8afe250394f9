//! Agglomerative clustering over a precomputed distance matrix.
//!
//! Bottom-up: start with each participant as its own cluster, repeatedly
//! merge the two closest clusters until one remains. The merge history forms
//! a [`Dendrogram`](crate::hierarchy::Dendrogram) annotated with the height
//! of every merge.
//!
//! Only complete linkage is provided: it keeps clusters compact, so a high
//! merge height reliably means "these members are far apart".

mod linkage;

pub use linkage::CompleteLinkage;
