//! Simulated pools and matches for exercising the splitter.
//!
//! Nothing here feeds the clustering core directly: it produces participants
//! and history the same way a real caller would, and moves ratings between
//! rounds with a plain Elo update.

use std::ops::RangeInclusive;

use chrono::{DateTime, Duration, Utc};
use rand::prelude::*;

use crate::error::{Error, Result};
use crate::participant::{Encounter, Participant, ParticipantId};

/// K-factor used when none is given.
pub const DEFAULT_K_FACTOR: f64 = 32.0;

/// Result of a match, from the first player's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// First player won.
    AWins,
    /// Second player won.
    BWins,
    /// Drawn.
    Draw,
}

impl Outcome {
    fn score_a(self) -> f64 {
        match self {
            Outcome::AWins => 1.0,
            Outcome::BWins => 0.0,
            Outcome::Draw => 0.5,
        }
    }
}

/// Probability that a player rated `rating_a` beats one rated `rating_b`.
pub fn expected_score(rating_a: f64, rating_b: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((rating_b - rating_a) / 400.0))
}

/// New ratings after one match.
///
/// Zero-sum: whatever one side gains the other loses.
pub fn elo_update(rating_a: f64, rating_b: f64, outcome: Outcome, k: f64) -> (f64, f64) {
    let delta = k * (outcome.score_a() - expected_score(rating_a, rating_b));
    (rating_a + delta, rating_b - delta)
}

/// Seeded generator of pools, history and match results.
#[derive(Debug, Clone)]
pub struct Population {
    rng: StdRng,
    epoch: DateTime<Utc>,
}

impl Population {
    /// Generator whose timestamps count back from `epoch`.
    pub fn new(seed: u64, epoch: DateTime<Utc>) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            epoch,
        }
    }

    /// The instant all generated timestamps precede.
    pub fn epoch(&self) -> DateTime<Utc> {
        self.epoch
    }

    /// `count` participants with ids `first_id..`, integer ratings drawn
    /// from `ratings` and join dates up to `max_age_days` before the epoch.
    pub fn participants(
        &mut self,
        first_id: ParticipantId,
        count: usize,
        ratings: RangeInclusive<i64>,
        max_age_days: i64,
    ) -> Vec<Participant> {
        (0..count as u64)
            .map(|i| {
                let id = first_id + i;
                let rating = self.rng.random_range(ratings.clone()) as f64;
                Participant::new(id, format!("Player{id}"), rating, self.days_ago(max_age_days))
            })
            .collect()
    }

    /// `count` matches between distinct random members of `participants`.
    pub fn encounters(
        &mut self,
        participants: &[Participant],
        count: usize,
        max_age_days: i64,
    ) -> Result<Vec<Encounter>> {
        if participants.len() < 2 {
            return Err(Error::InvalidParameter {
                name: "participants",
                message: format!("need at least 2 to play, got {}", participants.len()),
            });
        }
        let n = participants.len();
        Ok((0..count)
            .map(|_| {
                let a = self.rng.random_range(0..n);
                // second pick skips `a`
                let mut b = self.rng.random_range(0..n - 1);
                if b >= a {
                    b += 1;
                }
                Encounter::new(
                    participants[a].id,
                    participants[b].id,
                    self.days_ago(max_age_days),
                )
            })
            .collect())
    }

    /// Play `a` against `b` at `at`, drawing the winner from the Elo
    /// expectation and updating both ratings.
    pub fn play(
        &mut self,
        a: &mut Participant,
        b: &mut Participant,
        at: DateTime<Utc>,
    ) -> Encounter {
        let outcome = if self.rng.random::<f64>() < expected_score(a.rating, b.rating) {
            Outcome::AWins
        } else {
            Outcome::BWins
        };
        let (ra, rb) = elo_update(a.rating, b.rating, outcome, DEFAULT_K_FACTOR);
        a.rating = ra;
        b.rating = rb;
        Encounter::new(a.id, b.id, at)
    }

    fn days_ago(&mut self, max_days: i64) -> DateTime<Utc> {
        self.epoch - Duration::days(self.rng.random_range(0..=max_days.max(0)))
    }
}
