//! Pairwise dissimilarity between participants.
//!
//! Two signals feed each pair:
//!
//! | Signal | Raw value | Normalized contribution |
//! |--------|-----------|-------------------------|
//! | Skill | `|rating(a) - rating(b)|` | `(gap - min) / (max - min)` |
//! | Recency | seconds since last contact | `1 - (secs - min) / (max - min)` |
//!
//! ```text
//! d(a, b) = w × skill + (1 - w) × (1 - recency)
//! ```
//!
//! The recency term is inverted: the pair that met most recently scores the
//! full `1 - w`, a pair that has not met for the longest time scores 0. Since
//! the partitioner fills tables subtree by subtree, fresh rematches end up at
//! different tables. Pairs that never met count from the later of their two
//! join times.
//!
//! Both min and max are taken over all pairs of the run. When every pair has
//! the same raw value the range is clamped to `1.0`, so a flat axis
//! contributes a constant instead of NaN.

use chrono::{DateTime, Utc};
use ndarray::Array2;

use crate::error::{Error, Result};
use crate::participant::{check_unique_ids, Encounter, EncounterIndex, Participant};

/// Weighting of the two distance axes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceConfig {
    /// Weight `w` of the skill axis; recency gets `1 - w`.
    pub skill_weight: f64,
    /// Instant recency is measured against. `None` means "now".
    pub reference_time: Option<DateTime<Utc>>,
}

impl Default for DistanceConfig {
    fn default() -> Self {
        Self {
            skill_weight: 0.5,
            reference_time: None,
        }
    }
}

impl DistanceConfig {
    /// Create a configuration with equal weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the skill weight (must lie in `[0, 1]`).
    pub fn with_skill_weight(mut self, weight: f64) -> Self {
        self.skill_weight = weight;
        self
    }

    /// Pin the reference instant, making runs reproducible.
    pub fn with_reference_time(mut self, at: DateTime<Utc>) -> Self {
        self.reference_time = Some(at);
        self
    }

    fn validate(&self) -> Result<()> {
        if !self.skill_weight.is_finite() || !(0.0..=1.0).contains(&self.skill_weight) {
            return Err(Error::InvalidParameter {
                name: "skill_weight",
                message: format!("must lie in [0, 1], got {}", self.skill_weight),
            });
        }
        Ok(())
    }
}

/// Min/max of one raw axis over all pairs.
#[derive(Debug, Clone, Copy)]
struct Range {
    min: f64,
    max: f64,
}

impl Range {
    fn new() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    fn observe(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        let span = if span == 0.0 { 1.0 } else { span };
        (value - self.min) / span
    }
}

/// Symmetric participant × participant dissimilarity, zero on the diagonal.
///
/// Indices follow the order of the participant slice the matrix was built
/// from. The raw skill gap and recency seconds are kept alongside for
/// diagnostics.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    distances: Array2<f64>,
    skill_gaps: Array2<f64>,
    recency_secs: Array2<f64>,
}

impl DistanceMatrix {
    /// Build the matrix for one clustering run.
    pub fn build(
        participants: &[Participant],
        encounters: &[Encounter],
        config: &DistanceConfig,
    ) -> Result<Self> {
        config.validate()?;
        check_unique_ids(participants)?;
        if let Some(p) = participants.iter().find(|p| !p.rating.is_finite()) {
            return Err(Error::InvalidParameter {
                name: "rating",
                message: format!("participant {} has non-finite rating {}", p.id, p.rating),
            });
        }

        let n = participants.len();
        let now = config.reference_time.unwrap_or_else(Utc::now);
        let index = EncounterIndex::build(participants, encounters);

        let mut skill_gaps = Array2::<f64>::zeros((n, n));
        let mut recency_secs = Array2::<f64>::zeros((n, n));
        let mut skill_range = Range::new();
        let mut recency_range = Range::new();

        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = (&participants[i], &participants[j]);
                let gap = (a.rating - b.rating).abs();
                if !gap.is_finite() {
                    return Err(Error::InvalidParameter {
                        name: "rating",
                        message: format!(
                            "rating gap between participants {} and {} overflows",
                            a.id, b.id
                        ),
                    });
                }
                let last_contact = index
                    .last_encounter(a.id, b.id)
                    .unwrap_or_else(|| a.joined_at.max(b.joined_at));
                let secs = (now - last_contact).num_seconds() as f64;

                skill_range.observe(gap);
                recency_range.observe(secs);
                skill_gaps[[i, j]] = gap;
                skill_gaps[[j, i]] = gap;
                recency_secs[[i, j]] = secs;
                recency_secs[[j, i]] = secs;
            }
        }

        let w = config.skill_weight;
        let mut distances = Array2::<f64>::zeros((n, n));
        for i in 0..n {
            for j in (i + 1)..n {
                let skill = skill_range.normalize(skill_gaps[[i, j]]);
                let recency = 1.0 - recency_range.normalize(recency_secs[[i, j]]);
                let d = w * skill + (1.0 - w) * recency;
                distances[[i, j]] = d;
                distances[[j, i]] = d;
            }
        }

        tracing::debug!(
            n,
            met_pairs = index.len(),
            skill_weight = w,
            "built distance matrix"
        );

        Ok(Self {
            distances,
            skill_gaps,
            recency_secs,
        })
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.distances.nrows()
    }

    /// Whether the matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Distance between participants `i` and `j`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.distances[[i, j]]
    }

    /// Raw rating gap between `i` and `j`.
    pub fn skill_gap(&self, i: usize, j: usize) -> f64 {
        self.skill_gaps[[i, j]]
    }

    /// Raw seconds since `i` and `j` last met (or since the later join).
    pub fn recency_secs(&self, i: usize, j: usize) -> f64 {
        self.recency_secs[[i, j]]
    }

    /// The full square matrix.
    pub fn as_array(&self) -> &Array2<f64> {
        &self.distances
    }

    /// Upper triangle in row-major order, `n choose 2` entries.
    pub fn condensed(&self) -> Vec<f64> {
        let n = self.len();
        let mut out = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n.saturating_sub(1) {
            for j in (i + 1)..n {
                out.push(self.distances[[i, j]]);
            }
        }
        out
    }
}
