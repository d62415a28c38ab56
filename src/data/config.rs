//! Game configuration handed over by the lobby
//!
//! Assembled on the lobby screen, then frozen for the lifetime of one
//! session. The session never mutates it.

use super::QuizMode;
use crate::QuizError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Image-mode difficulty, from untouched sprite to heavy distortion
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    VeryEasy,
    Easy,
    Medium,
    Hard,
    VeryHard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::VeryEasy,
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::VeryHard,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::VeryEasy => "Very Easy",
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::VeryHard => "Very Hard",
        }
    }
}

/// Allowed countdown durations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerDuration {
    OneMinute,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    OneHour,
}

impl TimerDuration {
    pub const ALL: [TimerDuration; 5] = [
        TimerDuration::OneMinute,
        TimerDuration::FiveMinutes,
        TimerDuration::FifteenMinutes,
        TimerDuration::ThirtyMinutes,
        TimerDuration::OneHour,
    ];

    pub fn seconds(&self) -> u32 {
        match self {
            TimerDuration::OneMinute => 60,
            TimerDuration::FiveMinutes => 300,
            TimerDuration::FifteenMinutes => 900,
            TimerDuration::ThirtyMinutes => 1800,
            TimerDuration::OneHour => 3600,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimerDuration::OneMinute => "1 minute",
            TimerDuration::FiveMinutes => "5 minutes",
            TimerDuration::FifteenMinutes => "15 minutes",
            TimerDuration::ThirtyMinutes => "30 minutes",
            TimerDuration::OneHour => "1 hour",
        }
    }

    /// Parse a raw second count from an external handoff.
    pub fn from_seconds(seconds: u32) -> Result<Self, QuizError> {
        Self::ALL
            .into_iter()
            .find(|d| d.seconds() == seconds)
            .ok_or_else(|| {
                QuizError::InvalidConfiguration(format!(
                    "unsupported timer duration: {} seconds",
                    seconds
                ))
            })
    }
}

/// One session's immutable configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub mode: QuizMode,
    pub timer_enabled: bool,
    pub timer_duration: TimerDuration,
    /// Generations to draw creatures from; empty means generation 1 only
    pub generations: BTreeSet<u8>,
    /// Image-mode obfuscation level; ignored by the other modes
    pub difficulty: Difficulty,
}

impl GameConfig {
    pub fn new(mode: QuizMode) -> Self {
        Self {
            mode,
            timer_enabled: false,
            timer_duration: TimerDuration::OneMinute,
            generations: BTreeSet::new(),
            difficulty: Difficulty::Medium,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_parsing_accepts_only_the_allowed_values() {
        for duration in TimerDuration::ALL {
            assert_eq!(
                TimerDuration::from_seconds(duration.seconds()).unwrap(),
                duration
            );
        }
        assert!(TimerDuration::from_seconds(0).is_err());
        assert!(TimerDuration::from_seconds(120).is_err());
    }

    #[test]
    fn difficulty_levels_are_ordered() {
        for pair in Difficulty::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }
}
