//! Game constants configuration

use super::ConfigError;
use crate::character::{DEFAULT_CRIT_CHANCE, DEFAULT_CRIT_MULTIPLIER};
use serde::{Deserialize, Serialize};

/// Tunable game constants
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub combat: CombatConstants,
    #[serde(default)]
    pub crit: CritConstants,
    #[serde(default)]
    pub progression: ProgressionConstants,
}

/// Most level thresholds a single equal-level award may cover
pub const MAX_THRESHOLDS_PER_AWARD: f64 = 1000.0;

impl GameConstants {
    /// Reject values the combat and progression rules cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let out_of_range = |field: &'static str, reason: String| Err(ConfigError::OutOfRange { field, reason });

        if self.combat.max_turns == 0 {
            return out_of_range("combat.max_turns", "must be at least 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.crit.chance) {
            return out_of_range("crit.chance", format!("must be within [0, 1], got {}", self.crit.chance));
        }
        if self.crit.multiplier.is_nan() || self.crit.multiplier < 1.0 {
            return out_of_range("crit.multiplier", format!("must be at least 1, got {}", self.crit.multiplier));
        }
        let progression = &self.progression;
        if !progression.base_award.is_finite() || progression.base_award < 0.0 {
            return out_of_range(
                "progression.base_award",
                format!("must be a non-negative number, got {}", progression.base_award),
            );
        }
        if !progression.level_threshold.is_finite() || progression.level_threshold <= 0.0 {
            return out_of_range(
                "progression.level_threshold",
                format!("must be positive, got {}", progression.level_threshold),
            );
        }
        if progression.base_award / progression.level_threshold > MAX_THRESHOLDS_PER_AWARD {
            return out_of_range(
                "progression.base_award",
                format!(
                    "{} covers more than {MAX_THRESHOLDS_PER_AWARD} level thresholds of {}",
                    progression.base_award, progression.level_threshold
                ),
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatConstants {
    /// Turns after which an unresolved fight ends in a draw
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,
}

impl Default for CombatConstants {
    fn default() -> Self {
        CombatConstants {
            max_turns: default_max_turns(),
        }
    }
}

fn default_max_turns() -> u32 {
    1000
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CritConstants {
    /// Probability in [0, 1] that an attack crits
    #[serde(default = "default_crit_chance")]
    pub chance: f64,
    /// Damage multiplier on a crit (1.5 = 150%)
    #[serde(default = "default_crit_multiplier")]
    pub multiplier: f64,
}

impl Default for CritConstants {
    fn default() -> Self {
        CritConstants {
            chance: DEFAULT_CRIT_CHANCE,
            multiplier: DEFAULT_CRIT_MULTIPLIER,
        }
    }
}

fn default_crit_chance() -> f64 {
    DEFAULT_CRIT_CHANCE
}
fn default_crit_multiplier() -> f64 {
    DEFAULT_CRIT_MULTIPLIER
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionConstants {
    /// Experience for beating an opponent of equal level
    #[serde(default = "default_base_award")]
    pub base_award: f64,
    /// Experience consumed per level-up
    #[serde(default = "default_level_threshold")]
    pub level_threshold: f64,
}

impl Default for ProgressionConstants {
    fn default() -> Self {
        ProgressionConstants {
            base_award: default_base_award(),
            level_threshold: default_level_threshold(),
        }
    }
}

fn default_base_award() -> f64 {
    30.0
}
fn default_level_threshold() -> f64 {
    100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_constants;

    #[test]
    fn test_default_constants() {
        let constants = GameConstants::default();
        assert_eq!(constants.combat.max_turns, 1000);
        assert!((constants.crit.chance - 0.1).abs() < f64::EPSILON);
        assert!((constants.crit.multiplier - 1.5).abs() < f64::EPSILON);
        assert!((constants.progression.base_award - 30.0).abs() < f64::EPSILON);
        assert!((constants.progression.level_threshold - 100.0).abs() < f64::EPSILON);
        assert!(constants.validate().is_ok());
    }

    #[test]
    fn test_parse_constants() {
        let toml = r#"
[combat]
max_turns = 50

[crit]
chance = 0.25
multiplier = 2.0

[progression]
base_award = 10
level_threshold = 100
"#;

        let constants = parse_constants(toml).unwrap();
        assert_eq!(constants.combat.max_turns, 50);
        assert!((constants.crit.chance - 0.25).abs() < f64::EPSILON);
        assert!((constants.progression.base_award - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_sections_use_defaults() {
        let constants = parse_constants("[crit]\nchance = 0.0\n").unwrap();
        assert_eq!(constants.crit.chance, 0.0);
        assert!((constants.crit.multiplier - 1.5).abs() < f64::EPSILON);
        assert_eq!(constants.progression, ProgressionConstants::default());
    }

    #[test]
    fn test_validation_errors() {
        let mut constants = GameConstants::default();
        constants.crit.chance = 1.5;
        assert!(matches!(
            constants.validate(),
            Err(ConfigError::OutOfRange { field: "crit.chance", .. })
        ));

        let mut constants = GameConstants::default();
        constants.crit.multiplier = 0.5;
        assert!(constants.validate().is_err());

        let mut constants = GameConstants::default();
        constants.combat.max_turns = 0;
        assert!(constants.validate().is_err());

        let mut constants = GameConstants::default();
        constants.progression.level_threshold = 0.0;
        assert!(constants.validate().is_err());
    }

    #[test]
    fn test_parse_error() {
        let result = parse_constants("[combat]\nmax_turns = \"many\"\n");
        assert!(matches!(result, Err(ConfigError::Malformed(_))));
    }

    #[test]
    fn test_oversized_award_rejected() {
        let result = parse_constants("[progression]\nbase_award = 1e20\n");
        assert!(matches!(
            result,
            Err(ConfigError::OutOfRange { field: "progression.base_award", .. })
        ));

        let constants = parse_constants("[progression]\nbase_award = 100000\n").unwrap();
        assert!((constants.progression.base_award - 100_000.0).abs() < f64::EPSILON);
    }
}
