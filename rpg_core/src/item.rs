//! Item - Immutable stat modifier bound to an equipment slot

use crate::types::EquipmentSlot;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A piece of gear
///
/// Fields are private: once built, an item never changes. Use the
/// `with_*` builders to set bonuses at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    name: String,
    slot: EquipmentSlot,
    #[serde(default)]
    attack_bonus: u32,
    #[serde(default)]
    defense_bonus: u32,
    #[serde(default)]
    health_bonus: u32,
}

impl Item {
    /// Create an item with no bonuses
    pub fn new(name: impl Into<String>, slot: EquipmentSlot) -> Self {
        Item {
            name: name.into(),
            slot,
            attack_bonus: 0,
            defense_bonus: 0,
            health_bonus: 0,
        }
    }

    pub fn with_attack(mut self, bonus: u32) -> Self {
        self.attack_bonus = bonus;
        self
    }

    pub fn with_defense(mut self, bonus: u32) -> Self {
        self.defense_bonus = bonus;
        self
    }

    pub fn with_health(mut self, bonus: u32) -> Self {
        self.health_bonus = bonus;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slot(&self) -> EquipmentSlot {
        self.slot
    }

    pub fn attack_bonus(&self) -> u32 {
        self.attack_bonus
    }

    pub fn defense_bonus(&self) -> u32 {
        self.defense_bonus
    }

    pub fn health_bonus(&self) -> u32 {
        self.health_bonus
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] +{} atk / +{} def / +{} hp",
            self.name, self.slot, self.attack_bonus, self.defense_bonus, self.health_bonus
        )
    }
}
