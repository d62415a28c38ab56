//! Poke Quizz — guess-the-creature trivia in the terminal
//!
//! A casual quiz game: identify a creature from an obfuscated image, its
//! cry, or a list of progressively revealed stat clues. Creature data comes
//! from the public PokeAPI web service.
//!
//! # Game Mechanics
//!
//! - **Three modes**: image (blurred sprite), audio (cry), stat (clue list)
//! - **Scoring**: early, low-information answers earn more; give-ups cost
//! - **Streaks**: consecutive correct answers build a streak (image mode
//!   multiplies awards at streak milestones)
//! - **Countdown**: an optional shared timer ends the session when it expires
//!
//! # Architecture
//!
//! - `game` - Round lifecycle, scoring ledger, countdown timer, policies
//! - `net` - PokeAPI client and the `CreatureSource` seam
//! - `tui` - Terminal user interface with ratatui
//! - `data` - Creature records, game configuration, generation ranges

pub mod data;
pub mod game;
pub mod net;
pub mod tui;

pub use data::{CreatureRecord, GameConfig, QuizMode};
pub use game::Session;

/// Game version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for the game
pub type Result<T> = anyhow::Result<T>;

/// Custom error types
#[derive(thiserror::Error, Debug)]
pub enum QuizError {
    #[error("network error fetching creature #{id}: {message}")]
    Network { id: u32, message: String },

    #[error("no creature with identifier {0}")]
    NotFound(u32),

    #[error("malformed payload for creature #{id}: {message}")]
    MalformedPayload { id: u32, message: String },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
