//! Merge history of an agglomerative clustering run.
//!
//! Labels follow the SciPy/MATLAB convention: leaves are `0..n`, and the
//! cluster formed by merge `i` gets id `n + i`.

/// A dendrogram recording the `n - 1` merges over `n` items.
#[derive(Debug, Clone, PartialEq)]
pub struct Dendrogram {
    /// Merge history, in the order the merges happened.
    merges: Vec<MergeStep>,
    /// Number of original items.
    n_items: usize,
}

/// A single merge in the dendrogram.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MergeStep {
    /// Lower id of the two merged clusters.
    pub left: usize,
    /// Higher id of the two merged clusters.
    pub right: usize,
    /// Complete-linkage distance between the two at merge time.
    pub height: f64,
    /// Number of items in the merged cluster.
    pub size: usize,
}

impl Dendrogram {
    /// Create an empty dendrogram for n items.
    pub fn new(n_items: usize) -> Self {
        Self {
            merges: Vec::with_capacity(n_items.saturating_sub(1)),
            n_items,
        }
    }

    /// Record a merge.
    pub fn add_merge(&mut self, left: usize, right: usize, height: f64, size: usize) {
        self.merges.push(MergeStep {
            left,
            right,
            height,
            size,
        });
    }

    /// Number of original items.
    pub fn n_items(&self) -> usize {
        self.n_items
    }

    /// Number of merges recorded.
    pub fn n_merges(&self) -> usize {
        self.merges.len()
    }

    /// Iterate over merges in order.
    pub fn merges(&self) -> impl Iterator<Item = &MergeStep> {
        self.merges.iter()
    }

    /// Merge `i`, if recorded.
    pub fn merge(&self, i: usize) -> Option<&MergeStep> {
        self.merges.get(i)
    }

    /// Merge heights, parallel to [`Dendrogram::merges`].
    pub fn heights(&self) -> Vec<f64> {
        self.merges.iter().map(|m| m.height).collect()
    }

    /// Whether the history is complete (a single root remains).
    pub fn is_complete(&self) -> bool {
        self.merges.len() == self.n_items.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dendrogram_creation() {
        let dendro = Dendrogram::new(5);
        assert_eq!(dendro.n_items(), 5);
        assert_eq!(dendro.n_merges(), 0);
        assert!(!dendro.is_complete());
        assert!(Dendrogram::new(1).is_complete());
    }

    #[test]
    fn test_dendrogram_merge() {
        let mut dendro = Dendrogram::new(4);
        dendro.add_merge(0, 1, 0.5, 2);
        dendro.add_merge(2, 3, 0.7, 2);
        dendro.add_merge(4, 5, 1.0, 4); // clusters from previous merges

        assert_eq!(dendro.n_merges(), 3);
        assert!(dendro.is_complete());
        assert_eq!(dendro.heights(), vec![0.5, 0.7, 1.0]);
        assert_eq!(dendro.merge(2).map(|m| m.size), Some(4));
    }
}
