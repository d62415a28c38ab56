//! Data structures for the quiz
//!
//! Defines creature records, game configuration, and generation ranges.

pub mod config;
pub mod creature;
pub mod generation;

pub use config::*;
pub use creature::*;
pub use generation::*;

use serde::{Deserialize, Serialize};

/// The three quiz modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizMode {
    /// Guess from an obfuscated sprite
    Image,
    /// Guess from the creature's cry
    Audio,
    /// Guess from progressively revealed stat clues
    Stat,
}

impl QuizMode {
    pub const ALL: [QuizMode; 3] = [QuizMode::Image, QuizMode::Audio, QuizMode::Stat];

    pub fn name(&self) -> &'static str {
        match self {
            QuizMode::Image => "Image Quiz",
            QuizMode::Audio => "Sound Quiz",
            QuizMode::Stat => "Stat Quiz",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            QuizMode::Image => "Name the creature behind the blur",
            QuizMode::Audio => "Name the creature from its cry",
            QuizMode::Stat => "Name the creature from its stats, clue by clue",
        }
    }
}

impl std::fmt::Display for QuizMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
