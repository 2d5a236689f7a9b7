//! Class table - starting stats and per-level growth

use crate::types::CharacterClass;
use serde::{Deserialize, Serialize};

/// Attack, defense and health triple used for starting stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub attack: u32,
    pub defense: u32,
    pub health: u32,
}

impl BaseStats {
    pub const fn new(attack: u32, defense: u32, health: u32) -> Self {
        BaseStats { attack, defense, health }
    }
}

/// Stat increments applied on every level-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelDeltas {
    pub attack: u32,
    pub defense: u32,
    pub health: u32,
}

/// Starting stats plus growth for a playable class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassProfile {
    pub base: BaseStats,
    pub per_level: LevelDeltas,
}

const WARRIOR: ClassProfile = ClassProfile {
    base: BaseStats::new(15, 10, 100),
    per_level: LevelDeltas { attack: 3, defense: 2, health: 10 },
};

const ROGUE: ClassProfile = ClassProfile {
    base: BaseStats::new(15, 8, 90),
    per_level: LevelDeltas { attack: 3, defense: 2, health: 7 },
};

const PALADIN: ClassProfile = ClassProfile {
    base: BaseStats::new(14, 12, 110),
    per_level: LevelDeltas { attack: 3, defense: 4, health: 11 },
};

const MAGE: ClassProfile = ClassProfile {
    base: BaseStats::new(20, 5, 80),
    per_level: LevelDeltas { attack: 2, defense: 3, health: 8 },
};

impl CharacterClass {
    /// Fixed profile for a progressing class, `None` for bots
    pub fn profile(&self) -> Option<&'static ClassProfile> {
        match self {
            CharacterClass::Warrior => Some(&WARRIOR),
            CharacterClass::Rogue => Some(&ROGUE),
            CharacterClass::Paladin => Some(&PALADIN),
            CharacterClass::Mage => Some(&MAGE),
            CharacterClass::Bot => None,
        }
    }

    /// Growth per level; bots do not grow
    pub fn level_deltas(&self) -> Option<LevelDeltas> {
        self.profile().map(|p| p.per_level)
    }

    /// Starting stats at a given level
    ///
    /// Playable classes always start from their level-1 row. Bots scale
    /// linearly: attack `5 + 2L`, defense `2 + 2L`, health `50 + 4L`.
    pub fn starting_stats(&self, level: u32) -> BaseStats {
        match self.profile() {
            Some(profile) => profile.base,
            None => bot_stats(level),
        }
    }
}

/// Stats of a bot generated at `level`
pub fn bot_stats(level: u32) -> BaseStats {
    BaseStats::new(
        5u32.saturating_add(level.saturating_mul(2)),
        2u32.saturating_add(level.saturating_mul(2)),
        50u32.saturating_add(level.saturating_mul(4)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_table() {
        assert_eq!(CharacterClass::Warrior.starting_stats(1), BaseStats::new(15, 10, 100));
        assert_eq!(CharacterClass::Mage.starting_stats(1), BaseStats::new(20, 5, 80));
        assert_eq!(
            CharacterClass::Paladin.level_deltas(),
            Some(LevelDeltas { attack: 3, defense: 4, health: 11 })
        );
    }

    #[test]
    fn test_bot_scaling() {
        // Level 3: 5 + 6, 2 + 6, 50 + 12
        assert_eq!(CharacterClass::Bot.starting_stats(3), BaseStats::new(11, 8, 62));
        assert!(CharacterClass::Bot.level_deltas().is_none());
    }

    #[test]
    fn test_playable_classes_ignore_level_argument() {
        for class in CharacterClass::playable() {
            assert_eq!(class.starting_stats(1), class.starting_stats(7));
        }
    }
}
