//! Scoring ledger
//!
//! A pure reducer over round outcome events. Mode differences come in
//! through the `ScoringPolicy`; the ledger itself only knows how to apply
//! awards and penalties without ever letting points go negative.

use super::policy::ScoringPolicy;
use serde::{Deserialize, Serialize};

/// What a round produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Right answer; carries the number of extra clues consumed
    Correct { clues_used: u32 },
    /// Wrong answer; the round stays active
    Incorrect,
    /// Player asked for the answer
    GaveUp,
    /// The session countdown ran out
    TimedOut,
}

/// Running totals for one session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    pub points: u32,
    /// Consecutive correct guesses since the last miss or give-up
    pub streak: u32,
    /// Total correct guesses, never reset
    pub correct_count: u32,
    /// Set on timeout; further events are ignored
    frozen: bool,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Apply one outcome. Returns the signed point change actually applied
    /// (after the zero floor), for feedback messages.
    pub fn apply(&mut self, policy: &ScoringPolicy, outcome: Outcome) -> i64 {
        if self.frozen {
            return 0;
        }
        match outcome {
            Outcome::Correct { clues_used } => {
                self.streak += 1;
                self.correct_count += 1;
                let award = policy.correct_award(clues_used, self.streak);
                self.points += award;
                award as i64
            }
            Outcome::Incorrect => {
                self.streak = 0;
                self.deduct(policy.wrong_guess_penalty)
            }
            Outcome::GaveUp => {
                self.streak = 0;
                self.deduct(policy.give_up_penalty)
            }
            Outcome::TimedOut => {
                self.frozen = true;
                0
            }
        }
    }

    fn deduct(&mut self, penalty: u32) -> i64 {
        let applied = penalty.min(self.points);
        self.points -= applied;
        -(applied as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::QuizMode;

    #[test]
    fn points_never_go_below_zero() {
        let policy = ScoringPolicy::for_mode(QuizMode::Stat);
        let mut ledger = Ledger::new();
        for _ in 0..10 {
            ledger.apply(&policy, Outcome::GaveUp);
            ledger.apply(&policy, Outcome::Incorrect);
            assert_eq!(ledger.points, 0);
        }
    }

    #[test]
    fn penalty_is_clamped_not_skipped() {
        let policy = ScoringPolicy::for_mode(QuizMode::Stat);
        let mut ledger = Ledger::new();
        ledger.apply(&policy, Outcome::Correct { clues_used: 9 }); // +1
        let change = ledger.apply(&policy, Outcome::GaveUp); // -3 clamped to -1
        assert_eq!(change, -1);
        assert_eq!(ledger.points, 0);
    }

    #[test]
    fn any_miss_or_give_up_resets_the_streak() {
        let policy = ScoringPolicy::for_mode(QuizMode::Audio);
        let mut ledger = Ledger::new();
        for _ in 0..7 {
            ledger.apply(&policy, Outcome::Correct { clues_used: 0 });
        }
        assert_eq!(ledger.streak, 7);
        ledger.apply(&policy, Outcome::Incorrect);
        assert_eq!(ledger.streak, 0);

        for _ in 0..3 {
            ledger.apply(&policy, Outcome::Correct { clues_used: 0 });
        }
        ledger.apply(&policy, Outcome::GaveUp);
        assert_eq!(ledger.streak, 0);
    }

    #[test]
    fn correct_count_survives_streak_resets() {
        let policy = ScoringPolicy::for_mode(QuizMode::Stat);
        let mut ledger = Ledger::new();
        ledger.apply(&policy, Outcome::Correct { clues_used: 0 });
        ledger.apply(&policy, Outcome::GaveUp);
        ledger.apply(&policy, Outcome::Correct { clues_used: 2 });
        assert_eq!(ledger.correct_count, 2);
        assert_eq!(ledger.points, 10 + 8 - 3);
    }

    #[test]
    fn image_mode_milestones_scale_awards() {
        let policy = ScoringPolicy::for_mode(QuizMode::Image);
        let mut ledger = Ledger::new();
        let mut total = 0;
        for i in 1..=10 {
            let change = ledger.apply(&policy, Outcome::Correct { clues_used: 0 });
            let expected = if i >= 10 {
                3
            } else if i >= 5 {
                2
            } else {
                1
            };
            assert_eq!(change, expected);
            total += expected;
        }
        assert_eq!(ledger.points as i64, total);
    }

    #[test]
    fn timeout_freezes_the_ledger() {
        let policy = ScoringPolicy::for_mode(QuizMode::Audio);
        let mut ledger = Ledger::new();
        ledger.apply(&policy, Outcome::Correct { clues_used: 0 });
        ledger.apply(&policy, Outcome::TimedOut);
        assert!(ledger.is_frozen());

        let before = ledger.clone();
        ledger.apply(&policy, Outcome::Correct { clues_used: 0 });
        ledger.apply(&policy, Outcome::GaveUp);
        assert_eq!(ledger.points, before.points);
        assert_eq!(ledger.streak, before.streak);
        assert_eq!(ledger.correct_count, before.correct_count);
    }
}
