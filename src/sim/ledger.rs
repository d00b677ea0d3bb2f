//! Score and combo bookkeeping
//!
//! Score and combo only ever go up within a session. Misses are silent and
//! nothing decays the combo. Every time the score has moved at least
//! `MILESTONE_STEP` points past the score of the last milestone, the hit
//! that got it there produces a `Milestone`.

use serde::{Deserialize, Serialize};

use crate::consts::MILESTONE_STEP;

/// Score state reached by a milestone hit, handed to the commentary trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub score: u64,
    pub combo: u32,
}

/// Result of registering one hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitOutcome {
    pub score: u64,
    pub combo: u32,
    pub milestone: Option<Milestone>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLedger {
    score: u64,
    combo: u32,
    last_comment_score: u64,
}

impl ScoreLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    /// Score at which the last milestone fired
    pub fn last_comment_score(&self) -> u64 {
        self.last_comment_score
    }

    /// Add a hit worth `value` points.
    ///
    /// `last_comment_score` moves synchronously with the milestone, so a
    /// second hit in the same band (same tick or not) can't fire again.
    pub fn register_hit(&mut self, value: u32) -> HitOutcome {
        self.score += u64::from(value);
        self.combo += 1;

        let milestone = if self.score - self.last_comment_score >= MILESTONE_STEP {
            self.last_comment_score = self.score;
            Some(Milestone {
                score: self.score,
                combo: self.combo,
            })
        } else {
            None
        };

        HitOutcome {
            score: self.score,
            combo: self.combo,
            milestone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_single_milestone_after_second_hit() {
        let mut ledger = ScoreLedger::new();

        let first = ledger.register_hit(30);
        assert_eq!(first.milestone, None);
        assert_eq!((first.score, first.combo), (30, 1));

        let second = ledger.register_hit(25);
        assert_eq!(
            second.milestone,
            Some(Milestone {
                score: 55,
                combo: 2
            })
        );
        assert_eq!(ledger.last_comment_score(), 55);
    }

    #[test]
    fn test_batched_hits_fire_once_per_band() {
        let mut ledger = ScoreLedger {
            score: 45,
            combo: 4,
            last_comment_score: 0,
        };

        // Two hits in one tick: 45 -> 65 -> 75
        let fired: Vec<_> = [20, 10]
            .into_iter()
            .filter_map(|v| ledger.register_hit(v).milestone)
            .collect();

        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].score, 65);
        assert_eq!(ledger.last_comment_score(), 65);
        assert_eq!(ledger.score(), 75);
    }

    #[test]
    fn test_milestone_tracks_actual_score_not_band_edge() {
        let mut ledger = ScoreLedger {
            score: 45,
            combo: 0,
            last_comment_score: 0,
        };

        let outcome = ledger.register_hit(30);
        assert_eq!(outcome.milestone.map(|m| m.score), Some(75));
        // Not 50 then 100
        assert_eq!(ledger.last_comment_score(), 75);
        assert_eq!(ledger.register_hit(10).milestone, None);
    }

    #[test]
    fn test_high_energy_hit_fires_immediately() {
        let mut ledger = ScoreLedger::new();
        let outcome = ledger.register_hit(50);
        assert_eq!(outcome.milestone.map(|m| m.combo), Some(1));
    }

    proptest! {
        #[test]
        fn prop_register_hit_is_additive(values in prop::collection::vec(1u32..=100, 0..64)) {
            let mut ledger = ScoreLedger::new();
            let mut previous = 0u64;
            for &v in &values {
                let outcome = ledger.register_hit(v);
                prop_assert!(outcome.score > previous);
                previous = outcome.score;
            }
            let total: u64 = values.iter().map(|&v| u64::from(v)).sum();
            prop_assert_eq!(ledger.score(), total);
            prop_assert_eq!(ledger.combo() as usize, values.len());
        }

        #[test]
        fn prop_milestones_are_spaced_by_a_band(values in prop::collection::vec(1u32..=60, 1..64)) {
            let mut ledger = ScoreLedger::new();
            let mut last = 0u64;
            for &v in &values {
                if let Some(m) = ledger.register_hit(v).milestone {
                    prop_assert!(m.score - last >= MILESTONE_STEP);
                    last = m.score;
                }
                prop_assert!(ledger.score() - ledger.last_comment_score() < MILESTONE_STEP);
            }
        }
    }
}
