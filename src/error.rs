use thiserror::Error;

use crate::participant::ParticipantId;

/// Result alias for `draftsplit`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the distance model, the clusterer and the partitioner.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// No participants were supplied.
    #[error("empty input provided")]
    EmptyInput,

    /// Two participants share an id.
    #[error("participant id {id} appears more than once")]
    DuplicateParticipant {
        /// The repeated id.
        id: ParticipantId,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: String,
    },

    /// Matrix dimension mismatch.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Found dimension.
        found: usize,
    },

    /// Requested group sizes do not partition the participant set.
    #[error("group sizes {sizes:?} cannot split {n_items} participants: {reason}")]
    InvalidGroupSizes {
        /// The sizes as requested.
        sizes: Vec<usize>,
        /// Number of participants available.
        n_items: usize,
        /// What was wrong with the request.
        reason: String,
    },

    /// The merge tree does not match its own invariants.
    #[error("inconsistent merge tree: {0}")]
    InconsistentTree(String),
}
