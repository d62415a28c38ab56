//! Creature records fetched from the data service
//!
//! A record is immutable for the duration of a round: the fetch client
//! builds it once from the two PokeAPI payloads and the game only reads it.

use serde::{Deserialize, Serialize};

/// Base statistics, in the service's fixed order.
///
/// Each stat is optional: the service occasionally omits entries, and the
/// clue policy renders missing ones as "unknown" rather than skipping them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatSet {
    pub hp: Option<u32>,
    pub attack: Option<u32>,
    pub special_attack: Option<u32>,
    pub defense: Option<u32>,
    pub special_defense: Option<u32>,
    pub speed: Option<u32>,
}

/// Everything the game knows about one creature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureRecord {
    /// Identifier in the remote service (positive)
    pub id: u32,
    /// English canonical name
    pub name_en: String,
    /// French canonical name
    pub name_fr: String,
    /// Front sprite, if the service has one
    pub sprite_url: Option<String>,
    /// Cry audio clip
    pub cry_url: String,
    pub stats: StatSet,
    /// Height in decimetres, as served
    pub height: Option<u32>,
    /// Weight in hectograms, as served
    pub weight: Option<u32>,
    pub habitat: Option<String>,
    pub color: Option<String>,
    pub generation: Option<String>,
}

impl CreatureRecord {
    /// Check a guess against either localized name.
    ///
    /// Case-insensitive and whitespace-trimmed; an empty guess never matches.
    pub fn matches_guess(&self, guess: &str) -> bool {
        let guess = guess.trim().to_lowercase();
        if guess.is_empty() {
            return false;
        }
        guess == self.name_en.to_lowercase() || guess == self.name_fr.to_lowercase()
    }

    /// Both names for the reveal message, French first as tradition demands.
    pub fn display_names(&self) -> String {
        format!("{} / {}", self.name_fr, self.name_en)
    }
}
