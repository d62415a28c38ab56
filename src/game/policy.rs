//! Obfuscation, clue, and scoring policies
//!
//! Pure per-mode data that parameterizes the one generic round engine:
//! how hard the image is distorted, which clues exist and in what order,
//! and what each outcome is worth.

use crate::data::{CreatureRecord, Difficulty, QuizMode};

/// Visual transform applied to the sprite while the round is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageObfuscation {
    /// Blur radius in pixels; 0 means no blur
    pub blur_px: u8,
    /// Fully desaturate the sprite
    pub desaturate: bool,
}

impl ImageObfuscation {
    pub const CLEAR: ImageObfuscation = ImageObfuscation {
        blur_px: 0,
        desaturate: false,
    };

    pub fn is_clear(&self) -> bool {
        *self == Self::CLEAR
    }

    /// CSS-style filter descriptor, consumed by whatever renders the sprite
    pub fn filter(&self) -> String {
        match (self.blur_px, self.desaturate) {
            (0, false) => "none".to_string(),
            (0, true) => "grayscale(100%)".to_string(),
            (px, false) => format!("blur({}px)", px),
            (px, true) => format!("blur({}px) grayscale(100%)", px),
        }
    }
}

/// Map a difficulty level to an obfuscation strength.
///
/// Constant for the whole round; removed once the round is revealed.
pub fn obfuscation_for(difficulty: Difficulty) -> ImageObfuscation {
    match difficulty {
        Difficulty::VeryEasy => ImageObfuscation::CLEAR,
        Difficulty::Easy => ImageObfuscation {
            blur_px: 3,
            desaturate: false,
        },
        Difficulty::Medium => ImageObfuscation {
            blur_px: 5,
            desaturate: false,
        },
        Difficulty::Hard => ImageObfuscation {
            blur_px: 8,
            desaturate: false,
        },
        Difficulty::VeryHard => ImageObfuscation {
            blur_px: 12,
            desaturate: true,
        },
    }
}

/// Number of clues in every stat-mode round
pub const CLUE_COUNT: usize = 11;

fn stat_clue(label: &str, value: Option<u32>) -> String {
    match value {
        Some(v) => format!("{}: {}", label, v),
        None => format!("{}: unknown", label),
    }
}

fn text_clue(label: &str, value: Option<&str>) -> String {
    match value {
        Some(v) => format!("{}: {}", label, v),
        None => format!("{}: unknown", label),
    }
}

/// Build the ordered clue list for one creature.
///
/// Fixed order and fixed length; missing fields still produce an entry so
/// the reveal cursor means the same thing for every creature.
pub fn clue_sequence(record: &CreatureRecord) -> Vec<String> {
    let clues = vec![
        stat_clue("HP", record.stats.hp),
        stat_clue("Height", record.height),
        stat_clue("Weight", record.weight),
        text_clue("Habitat", record.habitat.as_deref()),
        text_clue("Generation", record.generation.as_deref()),
        stat_clue("Attack", record.stats.attack),
        stat_clue("Special Attack", record.stats.special_attack),
        stat_clue("Defense", record.stats.defense),
        stat_clue("Special Defense", record.stats.special_defense),
        stat_clue("Speed", record.stats.speed),
        text_clue("Color", record.color.as_deref()),
    ];
    debug_assert_eq!(clues.len(), CLUE_COUNT);
    clues
}

/// How correct answers are rewarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AwardRule {
    /// Fixed award per correct answer
    Flat { base: u32 },
    /// Fewer clues consumed means more points: `max(base - clues_used, floor)`
    ClueScaled { base: u32, floor: u32 },
}

/// Per-mode scoring parameters.
///
/// The engine is generic; everything mode-specific about points lives here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringPolicy {
    pub award: AwardRule,
    /// Deducted on a wrong guess, floored at zero points
    pub wrong_guess_penalty: u32,
    /// Deducted on give-up, floored at zero points
    pub give_up_penalty: u32,
    /// Scale awards at streak milestones (x2 at 5+, x3 at 10+)
    pub streak_multipliers: bool,
}

impl ScoringPolicy {
    pub fn for_mode(mode: QuizMode) -> Self {
        match mode {
            QuizMode::Image => Self {
                award: AwardRule::Flat { base: 1 },
                wrong_guess_penalty: 0,
                give_up_penalty: 2,
                streak_multipliers: true,
            },
            QuizMode::Audio => Self {
                award: AwardRule::Flat { base: 1 },
                wrong_guess_penalty: 1,
                give_up_penalty: 1,
                streak_multipliers: false,
            },
            // Clues already leaked information, so giving up costs the most.
            QuizMode::Stat => Self {
                award: AwardRule::ClueScaled { base: 10, floor: 1 },
                wrong_guess_penalty: 0,
                give_up_penalty: 3,
                streak_multipliers: false,
            },
        }
    }

    /// Points for a correct answer, given clues consumed and the streak
    /// counting this answer.
    pub fn correct_award(&self, clues_used: u32, streak: u32) -> u32 {
        let base = match self.award {
            AwardRule::Flat { base } => base,
            AwardRule::ClueScaled { base, floor } => base.saturating_sub(clues_used).max(floor),
        };
        base * self.multiplier(streak)
    }

    fn multiplier(&self, streak: u32) -> u32 {
        if !self.streak_multipliers {
            1
        } else if streak >= 10 {
            3
        } else if streak >= 5 {
            2
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::StatSet;

    fn sparse_record() -> CreatureRecord {
        CreatureRecord {
            id: 92,
            name_en: "Gastly".to_string(),
            name_fr: "Fantominus".to_string(),
            sprite_url: None,
            cry_url: String::new(),
            stats: StatSet {
                hp: Some(30),
                attack: Some(35),
                special_attack: Some(100),
                defense: None,
                special_defense: Some(35),
                speed: Some(80),
            },
            height: Some(13),
            weight: None,
            habitat: None,
            color: Some("purple".to_string()),
            generation: Some("generation-i".to_string()),
        }
    }

    #[test]
    fn clue_sequence_has_fixed_length_and_order() {
        let clues = clue_sequence(&sparse_record());
        assert_eq!(clues.len(), CLUE_COUNT);
        assert_eq!(clues[0], "HP: 30");
        assert_eq!(clues[1], "Height: 13");
        assert_eq!(clues[4], "Generation: generation-i");
        assert_eq!(clues[10], "Color: purple");
    }

    #[test]
    fn missing_fields_render_as_unknown() {
        let clues = clue_sequence(&sparse_record());
        assert_eq!(clues[2], "Weight: unknown");
        assert_eq!(clues[3], "Habitat: unknown");
        assert_eq!(clues[7], "Defense: unknown");
    }

    #[test]
    fn stat_reward_shrinks_with_clues_and_floors_at_one() {
        let policy = ScoringPolicy::for_mode(QuizMode::Stat);
        assert_eq!(policy.correct_award(0, 1), 10);
        assert_eq!(policy.correct_award(3, 1), 7);
        assert_eq!(policy.correct_award(9, 1), 1);
        assert_eq!(policy.correct_award(15, 1), 1);
    }

    #[test]
    fn streak_multipliers_apply_only_where_enabled() {
        let image = ScoringPolicy::for_mode(QuizMode::Image);
        assert_eq!(image.correct_award(0, 1), 1);
        assert_eq!(image.correct_award(0, 4), 1);
        assert_eq!(image.correct_award(0, 5), 2);
        assert_eq!(image.correct_award(0, 10), 3);

        let audio = ScoringPolicy::for_mode(QuizMode::Audio);
        assert_eq!(audio.correct_award(0, 12), 1);
    }

    #[test]
    fn obfuscation_strength_grows_with_difficulty() {
        let mut last_blur = 0;
        for difficulty in Difficulty::ALL {
            let ob = obfuscation_for(difficulty);
            assert!(ob.blur_px >= last_blur);
            last_blur = ob.blur_px;
        }
        assert!(obfuscation_for(Difficulty::VeryEasy).is_clear());
        assert!(obfuscation_for(Difficulty::VeryHard).desaturate);
    }

    #[test]
    fn filter_descriptor_matches_the_transform() {
        assert_eq!(ImageObfuscation::CLEAR.filter(), "none");
        assert_eq!(
            ImageObfuscation {
                blur_px: 8,
                desaturate: true
            }
            .filter(),
            "blur(8px) grayscale(100%)"
        );
    }
}
