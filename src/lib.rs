//! # draftsplit
//!
//! Split a player pool into draft tables so that each table mixes players
//! who are far apart on skill and who have not faced each other recently.
//!
//! The pipeline runs strictly forward:
//!
//! ```text
//! participants + history ─► DistanceMatrix ─► CompleteLinkage ─► Dendrogram
//!                                                                   │
//!                              groups ◄─ split_tree ◄─ MergeTree ◄──┘
//! ```
//!
//! [`TableSplitter`] runs the first three stages once and can then be split
//! repeatedly. The [`report`] module renders diagnostics; the `sim` feature
//! adds a seeded pool generator and an Elo update for multi-round tests.

pub mod cluster;
/// Error types used across `draftsplit`.
pub mod error;
pub mod distance;
pub mod hierarchy;
pub mod participant;
pub mod report;
#[cfg(feature = "sim")]
pub mod sim;
pub mod split;
mod splitter;

#[cfg(test)]
mod pipeline_tests;

pub use cluster::CompleteLinkage;
pub use distance::{DistanceConfig, DistanceMatrix};
pub use error::{Error, Result};
pub use hierarchy::{Dendrogram, MergeStep, MergeTree, Node, NodeContent};
pub use participant::{Encounter, EncounterIndex, Participant, ParticipantId};
pub use report::{format_seconds, DistanceListing, MergeListing, TreeDump};
pub use split::{check_sizes, split_tree};
pub use splitter::TableSplitter;

#[cfg(feature = "sim")]
pub use sim::{elo_update, Outcome, Population};
