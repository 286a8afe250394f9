//! Complete-linkage agglomerative clustering.
//!
//! Bottom-up clustering that builds a **dendrogram** by iteratively
//! merging the two closest clusters, where "closest" is measured by the
//! *largest* pairwise distance between their members:
//!
//! ```text
//! D(A, B) = max { d(a, b) : a ∈ A, b ∈ B }
//! ```
//!
//! After merging A and B, the distance to any other cluster C follows the
//! update rule `D(A∪B, C) = max(D(A, C), D(B, C))`, so raw pairs are never
//! rescanned.
//!
//! # Determinism
//!
//! Active clusters occupy slots `0..n`. A merge keeps the result in the lower
//! slot and retires the higher one. The minimum is searched over slot pairs
//! `(p, q)`, `p < q`, in row-major order and only replaced on a strictly
//! smaller distance, so ties resolve to the lowest slot pair.
//!
//! Heights are not guaranteed to be monotone step to step.
//!
//! # Complexity
//!
//! O(n³) time, O(n²) space. Draft pools are small.

use ndarray::Array2;

use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};
use crate::hierarchy::Dendrogram;

/// Complete-linkage agglomerative clusterer.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompleteLinkage;

impl CompleteLinkage {
    /// Create a new clusterer.
    pub fn new() -> Self {
        Self
    }

    /// Cluster a participant distance matrix.
    pub fn fit(&self, distances: &DistanceMatrix) -> Result<Dendrogram> {
        self.fit_array(distances.as_array())
    }

    /// Cluster any square, symmetric dissimilarity matrix.
    ///
    /// Only the upper triangle is read.
    pub fn fit_array(&self, distances: &Array2<f64>) -> Result<Dendrogram> {
        let n = distances.nrows();
        if n == 0 {
            return Err(Error::EmptyInput);
        }
        if distances.ncols() != n {
            return Err(Error::DimensionMismatch {
                expected: n,
                found: distances.ncols(),
            });
        }
        if distances.iter().any(|d| d.is_nan()) {
            return Err(Error::InvalidParameter {
                name: "distances",
                message: "matrix contains NaN".to_string(),
            });
        }

        let mut work = distances.clone();
        let mut active = vec![true; n];
        // Current cluster id held by each slot.
        let mut ids: Vec<usize> = (0..n).collect();
        let mut sizes = vec![1usize; n];
        let mut dendro = Dendrogram::new(n);

        for step in 0..n.saturating_sub(1) {
            let (p, q, height) = closest_pair(&work, &active).ok_or_else(|| {
                Error::InconsistentTree(format!("no active pair left at step {step}"))
            })?;

            let size = sizes[p] + sizes[q];
            dendro.add_merge(ids[p].min(ids[q]), ids[p].max(ids[q]), height, size);
            tracing::trace!(
                step,
                left = ids[p].min(ids[q]),
                right = ids[p].max(ids[q]),
                height,
                size,
                "merge"
            );

            for r in 0..n {
                if !active[r] || r == p || r == q {
                    continue;
                }
                let d = work[[p, r]].max(work[[q, r]]);
                work[[p, r]] = d;
                work[[r, p]] = d;
            }

            active[q] = false;
            ids[p] = n + step;
            sizes[p] = size;
        }

        tracing::debug!(
            n_items = n,
            n_merges = dendro.n_merges(),
            root_height = dendro.heights().last().copied().unwrap_or(0.0),
            "complete linkage finished"
        );

        Ok(dendro)
    }
}

/// Lowest slot pair at minimal distance among active slots.
fn closest_pair(work: &Array2<f64>, active: &[bool]) -> Option<(usize, usize, f64)> {
    let n = active.len();
    let mut best: Option<(usize, usize, f64)> = None;
    for p in (0..n).filter(|&p| active[p]) {
        for q in ((p + 1)..n).filter(|&q| active[q]) {
            let d = work[[p, q]];
            if best.map_or(true, |(_, _, b)| d < b) {
                best = Some((p, q, d));
            }
        }
    }
    best
}
