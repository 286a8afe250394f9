//! Participants and their shared match history.
//!
//! History only matters through timestamps: the outcome of a match plays no
//! part in distancing. [`EncounterIndex`] folds the append-only history into
//! a pair → latest-timestamp lookup once per clustering run.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};

/// Stable identity of a participant within one run.
pub type ParticipantId = u64;

/// A player in the pool.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Participant {
    /// Unique id.
    pub id: ParticipantId,
    /// Display name, used by diagnostics only.
    pub name: String,
    /// Skill rating.
    pub rating: f64,
    /// When the participant joined the pool.
    pub joined_at: DateTime<Utc>,
}

impl Participant {
    /// Create a participant.
    pub fn new(
        id: ParticipantId,
        name: impl Into<String>,
        rating: f64,
        joined_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            rating,
            joined_at,
        }
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (id {}, rating {:.1}, joined {})",
            self.name,
            self.id,
            self.rating,
            self.joined_at.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

/// A past match between two participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Encounter {
    /// One side.
    pub a: ParticipantId,
    /// The other side.
    pub b: ParticipantId,
    /// When the match was played.
    pub played_at: DateTime<Utc>,
}

impl Encounter {
    /// Record a match between `a` and `b`.
    pub fn new(a: ParticipantId, b: ParticipantId, played_at: DateTime<Utc>) -> Self {
        Self { a, b, played_at }
    }

    /// The unordered pair as `(low, high)`.
    pub fn key(&self) -> (ParticipantId, ParticipantId) {
        pair_key(self.a, self.b)
    }

    /// Whether this encounter was between `x` and `y`, in either order.
    pub fn involves(&self, x: ParticipantId, y: ParticipantId) -> bool {
        self.key() == pair_key(x, y)
    }
}

fn pair_key(x: ParticipantId, y: ParticipantId) -> (ParticipantId, ParticipantId) {
    if x <= y {
        (x, y)
    } else {
        (y, x)
    }
}

/// Latest encounter timestamp per unordered pair.
#[derive(Debug, Clone, Default)]
pub struct EncounterIndex {
    last: HashMap<(ParticipantId, ParticipantId), DateTime<Utc>>,
}

impl EncounterIndex {
    /// Index `encounters`, keeping only pairs of known, distinct participants.
    pub fn build(participants: &[Participant], encounters: &[Encounter]) -> Self {
        let known: HashSet<ParticipantId> = participants.iter().map(|p| p.id).collect();
        let mut last: HashMap<(ParticipantId, ParticipantId), DateTime<Utc>> = HashMap::new();
        let mut skipped = 0usize;

        for encounter in encounters {
            if encounter.a == encounter.b
                || !known.contains(&encounter.a)
                || !known.contains(&encounter.b)
            {
                skipped += 1;
                continue;
            }
            last.entry(encounter.key())
                .and_modify(|t| {
                    if encounter.played_at > *t {
                        *t = encounter.played_at;
                    }
                })
                .or_insert(encounter.played_at);
        }

        if skipped > 0 {
            tracing::debug!(skipped, "ignored encounters outside the population");
        }
        Self { last }
    }

    /// Most recent encounter between `x` and `y`, if they ever met.
    pub fn last_encounter(&self, x: ParticipantId, y: ParticipantId) -> Option<DateTime<Utc>> {
        self.last.get(&pair_key(x, y)).copied()
    }

    /// Number of distinct pairs that have met.
    pub fn len(&self) -> usize {
        self.last.len()
    }

    /// Whether no pair has met.
    pub fn is_empty(&self) -> bool {
        self.last.is_empty()
    }
}

/// Reject an empty pool or one with repeated ids.
pub(crate) fn check_unique_ids(participants: &[Participant]) -> Result<()> {
    if participants.is_empty() {
        return Err(Error::EmptyInput);
    }
    let mut seen = HashSet::with_capacity(participants.len());
    for p in participants {
        if !seen.insert(p.id) {
            return Err(Error::DuplicateParticipant { id: p.id });
        }
    }
    Ok(())
}
