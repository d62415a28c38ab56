//! Round state machine
//!
//! One round is one guess-the-creature attempt: `Loading` until the fetch
//! resolves, `Active` while guessable, `Revealed` once the answer is out.
//! `Revealed` is terminal; the only way forward is a fresh round.
//!
//! Every round carries a process-unique token. A fetch completion
//! whose token does not match the current round is stale and is discarded,
//! so a late response for a superseded round can never leak into a new one.

use super::policy::{clue_sequence, ImageObfuscation};
use super::scoring::Outcome;
use crate::data::CreatureRecord;
use crate::QuizError;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Identity of one round, unique for the lifetime of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoundToken(pub u64);

impl RoundToken {
    /// Mint a token never handed out before.
    ///
    /// Process-wide uniqueness matters: the fetch worker outlives sessions,
    /// so a token scoped to one session could collide with the next
    /// session's rounds and slip a dead session's creature past the guard.
    pub fn fresh() -> Self {
        Self(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Loading,
    Active,
    Revealed,
}

/// A fetch the host must run on behalf of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub token: RoundToken,
    pub id: u32,
}

/// One guess-the-creature attempt
#[derive(Debug, Clone)]
pub struct Round {
    token: RoundToken,
    phase: RoundPhase,
    creature: Option<CreatureRecord>,
    clues: Vec<String>,
    clue_cursor: usize,
    obfuscation: ImageObfuscation,
    load_failed: bool,
    /// Free-text guess input
    pub guess: String,
    /// Last feedback line shown to the player
    pub feedback: String,
}

impl Round {
    /// Start a round in `Loading`, waiting for its fetch to resolve.
    pub fn begin(token: RoundToken, obfuscation: ImageObfuscation) -> Self {
        Self {
            token,
            phase: RoundPhase::Loading,
            creature: None,
            clues: Vec::new(),
            clue_cursor: 0,
            obfuscation,
            load_failed: false,
            guess: String::new(),
            feedback: String::new(),
        }
    }

    pub fn token(&self) -> RoundToken {
        self.token
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn creature(&self) -> Option<&CreatureRecord> {
        self.creature.as_ref()
    }

    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    pub fn clues(&self) -> &[String] {
        &self.clues
    }

    pub fn clue_cursor(&self) -> usize {
        self.clue_cursor
    }

    pub fn current_clue(&self) -> Option<&str> {
        self.clues.get(self.clue_cursor).map(String::as_str)
    }

    /// Extra clues consumed beyond the first, for the scoring formula
    pub fn clues_used(&self) -> u32 {
        self.clue_cursor as u32
    }

    /// Obfuscation in effect: the round's own while active, none once revealed
    pub fn obfuscation(&self) -> ImageObfuscation {
        if self.phase == RoundPhase::Revealed {
            ImageObfuscation::CLEAR
        } else {
            self.obfuscation
        }
    }

    /// Resolve this round's fetch. Returns false when the completion was
    /// stale (wrong token, or the round already moved on) and was discarded.
    pub fn resolve_fetch(
        &mut self,
        token: RoundToken,
        result: Result<CreatureRecord, QuizError>,
    ) -> bool {
        if token != self.token || self.phase != RoundPhase::Loading || self.load_failed {
            tracing::debug!(?token, current = ?self.token, "discarding stale fetch result");
            return false;
        }
        match result {
            Ok(record) => {
                tracing::debug!(id = record.id, "round active");
                self.clues = clue_sequence(&record);
                self.creature = Some(record);
                self.phase = RoundPhase::Active;
            }
            Err(err) => {
                tracing::warn!(%err, "creature fetch failed");
                self.load_failed = true;
                self.feedback = "Could not load a creature. Try the next one.".to_string();
            }
        }
        true
    }

    /// Submit the current guess buffer.
    ///
    /// Returns the outcome, or None when the round is not guessable
    /// (loading, failed, or already revealed).
    pub fn submit_guess(&mut self) -> Option<Outcome> {
        if self.phase != RoundPhase::Active {
            return None;
        }
        let creature = self.creature.as_ref()?;
        if creature.matches_guess(&self.guess) {
            self.phase = RoundPhase::Revealed;
            Some(Outcome::Correct {
                clues_used: self.clues_used(),
            })
        } else {
            Some(Outcome::Incorrect)
        }
    }

    /// Give up and reveal the answer.
    pub fn give_up(&mut self) -> Option<Outcome> {
        if self.phase != RoundPhase::Active {
            return None;
        }
        self.phase = RoundPhase::Revealed;
        Some(Outcome::GaveUp)
    }

    /// Force-reveal on timer expiry. Returns true if the round was active.
    pub fn expire(&mut self) -> bool {
        if self.phase == RoundPhase::Active {
            self.phase = RoundPhase::Revealed;
            true
        } else {
            false
        }
    }

    /// Reveal one more clue. Capped at the last index and idempotent there;
    /// the cursor never moves backwards within a round.
    pub fn request_clue(&mut self) {
        if self.phase != RoundPhase::Active || self.clues.is_empty() {
            return;
        }
        self.clue_cursor = (self.clue_cursor + 1).min(self.clues.len() - 1);
    }
}
