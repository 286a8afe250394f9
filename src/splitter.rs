//! One clustering run over a player pool.

use crate::cluster::CompleteLinkage;
use crate::distance::{DistanceConfig, DistanceMatrix};
use crate::error::Result;
use crate::hierarchy::{Dendrogram, MergeTree};
use crate::participant::{Encounter, Participant};
use crate::split::split_tree;

/// Distance matrix, dendrogram and merge tree for a fixed pool.
///
/// Everything is computed once in [`TableSplitter::new`] and never mutated,
/// so [`TableSplitter::split`] can be called any number of times, from any
/// number of threads. A new round with updated ratings needs a new splitter.
///
/// ```rust
/// use chrono::{Duration, TimeZone, Utc};
/// use draftsplit::{DistanceConfig, Participant, TableSplitter};
///
/// let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let players: Vec<_> = (0..6)
///     .map(|i| Participant::new(i, format!("P{i}"), 1000.0 + 100.0 * i as f64, now - Duration::days(i as i64)))
///     .collect();
///
/// let splitter = TableSplitter::new(players, &[], DistanceConfig::new().with_reference_time(now)).unwrap();
/// let tables = splitter.split(&[4, 2]).unwrap();
/// assert_eq!(tables[0].len(), 4);
/// assert_eq!(tables[1].len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct TableSplitter {
    participants: Vec<Participant>,
    distances: DistanceMatrix,
    dendrogram: Dendrogram,
    tree: MergeTree,
}

impl TableSplitter {
    /// Run the distance model, the clusterer and the tree builder.
    ///
    /// An empty pool is [`Error::EmptyInput`](crate::Error::EmptyInput); a
    /// single participant gives a one-leaf tree.
    pub fn new(
        participants: Vec<Participant>,
        encounters: &[Encounter],
        config: DistanceConfig,
    ) -> Result<Self> {
        let distances = DistanceMatrix::build(&participants, encounters, &config)?;
        let dendrogram = CompleteLinkage::new().fit(&distances)?;
        let tree = MergeTree::from_dendrogram(&dendrogram)?;

        tracing::debug!(
            participants = participants.len(),
            encounters = encounters.len(),
            "clustering run ready"
        );

        Ok(Self {
            participants,
            distances,
            dendrogram,
            tree,
        })
    }

    /// Split the pool into groups of `sizes`, in order.
    pub fn split(&self, sizes: &[usize]) -> Result<Vec<Vec<&Participant>>> {
        let groups = split_tree(&self.tree, sizes)?;
        Ok(groups
            .into_iter()
            .map(|g| g.into_iter().map(|i| &self.participants[i]).collect())
            .collect())
    }

    /// Participants in matrix order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// The distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// The merge history.
    pub fn dendrogram(&self) -> &Dendrogram {
        &self.dendrogram
    }

    /// The merge tree.
    pub fn tree(&self) -> &MergeTree {
        &self.tree
    }
}
