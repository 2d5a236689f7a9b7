//! Core enumerations shared across the crate

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Equipment slot for gear
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Head,
    LeftHand,
    RightHand,
    Body,
    Feet,
    Ring,
}

impl EquipmentSlot {
    /// Get all equipment slots
    pub fn all() -> &'static [EquipmentSlot] {
        &[
            EquipmentSlot::Head,
            EquipmentSlot::LeftHand,
            EquipmentSlot::RightHand,
            EquipmentSlot::Body,
            EquipmentSlot::Feet,
            EquipmentSlot::Ring,
        ]
    }

    /// Snake-case name, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentSlot::Head => "head",
            EquipmentSlot::LeftHand => "left_hand",
            EquipmentSlot::RightHand => "right_hand",
            EquipmentSlot::Body => "body",
            EquipmentSlot::Feet => "feet",
            EquipmentSlot::Ring => "ring",
        }
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Slot name that does not match any [`EquipmentSlot`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown equipment slot: {0}")]
pub struct UnknownSlot(pub String);

impl FromStr for EquipmentSlot {
    type Err = UnknownSlot;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        EquipmentSlot::all()
            .iter()
            .copied()
            .find(|slot| slot.as_str() == normalized)
            .ok_or_else(|| UnknownSlot(s.to_string()))
    }
}

/// Character class tag
///
/// Each class carries a fixed row of starting stats and per-level deltas,
/// see [`crate::character::ClassProfile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterClass {
    Warrior,
    Rogue,
    Paladin,
    Mage,
    /// Generated opponent; never levels up
    Bot,
}

impl CharacterClass {
    /// Classes a player may pick
    pub fn playable() -> &'static [CharacterClass] {
        &[
            CharacterClass::Warrior,
            CharacterClass::Rogue,
            CharacterClass::Paladin,
            CharacterClass::Mage,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterClass::Warrior => "warrior",
            CharacterClass::Rogue => "rogue",
            CharacterClass::Paladin => "paladin",
            CharacterClass::Mage => "mage",
            CharacterClass::Bot => "bot",
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Class name that does not match any [`CharacterClass`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown character class: {0}")]
pub struct UnknownClass(pub String);

impl FromStr for CharacterClass {
    type Err = UnknownClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "warrior" => Ok(CharacterClass::Warrior),
            "rogue" => Ok(CharacterClass::Rogue),
            "paladin" => Ok(CharacterClass::Paladin),
            "mage" => Ok(CharacterClass::Mage),
            "bot" => Ok(CharacterClass::Bot),
            _ => Err(UnknownClass(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_parse() {
        assert_eq!("head".parse::<EquipmentSlot>(), Ok(EquipmentSlot::Head));
        assert_eq!("Left-Hand".parse::<EquipmentSlot>(), Ok(EquipmentSlot::LeftHand));
        assert_eq!("right hand".parse::<EquipmentSlot>(), Ok(EquipmentSlot::RightHand));
        assert!("tail".parse::<EquipmentSlot>().is_err());
    }

    #[test]
    fn test_slot_serde_names() {
        let json = serde_json::to_string(&EquipmentSlot::LeftHand).unwrap();
        assert_eq!(json, "\"left_hand\"");
        for slot in EquipmentSlot::all() {
            let json = serde_json::to_string(slot).unwrap();
            assert_eq!(json, format!("\"{}\"", slot.as_str()));
        }
    }

    #[test]
    fn test_class_parse() {
        assert_eq!("Mage".parse::<CharacterClass>(), Ok(CharacterClass::Mage));
        assert_eq!(
            "necromancer".parse::<CharacterClass>(),
            Err(UnknownClass("necromancer".to_string()))
        );
    }

    #[test]
    fn test_bot_not_playable() {
        assert!(!CharacterClass::playable().contains(&CharacterClass::Bot));
        assert_eq!(EquipmentSlot::all().len(), 6);
    }
}
