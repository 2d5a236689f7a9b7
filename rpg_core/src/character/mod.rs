//! Character - Base stats, gear and class-driven growth

mod bot;
mod class;

pub use bot::generate_opponent;
pub use class::{bot_stats, BaseStats, ClassProfile, LevelDeltas};

use crate::config::CritConstants;
use crate::equipment::EquipmentSet;
use crate::inventory::Inventory;
use crate::item::Item;
use crate::types::{CharacterClass, EquipmentSlot, UnknownClass};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Default chance for an attack to crit
pub const DEFAULT_CRIT_CHANCE: f64 = 0.1;
/// Default damage multiplier on a crit
pub const DEFAULT_CRIT_MULTIPLIER: f64 = 1.5;

/// A character state that breaks the model's invariants
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    #[error("{name}: level must be at least 1")]
    LevelZero { name: String },
    #[error("{name}: health {health} exceeds maximum {max}")]
    HealthAboveMax { name: String, health: u32, max: u32 },
    #[error("{name}: critical chance {chance} is outside [0, 1]")]
    CritChanceOutOfRange { name: String, chance: f64 },
    #[error("{name}: critical multiplier {multiplier} is below 1")]
    CritMultiplierBelowOne { name: String, multiplier: f64 },
    #[error("{name}: experience {experience} is negative or not finite")]
    InvalidExperience { name: String, experience: f64 },
    #[error("{name}: item {item} is equipped in the {slot} slot")]
    MisplacedItem { name: String, item: String, slot: EquipmentSlot },
}

/// Outcome of a single attack roll
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackRoll {
    /// Raw damage before the defender's mitigation
    pub value: f64,
    pub critical: bool,
}

/// A combatant: player character or generated bot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    name: String,
    class: CharacterClass,
    pub(crate) attack: u32,
    pub(crate) defense: u32,
    /// Base health ceiling, before gear
    pub(crate) max_health: u32,
    /// Current base health pool
    pub(crate) health: u32,
    pub(crate) level: u32,
    pub(crate) experience: f64,
    crit_chance: f64,
    crit_multiplier: f64,
    #[serde(default)]
    equipment: EquipmentSet,
    #[serde(default)]
    inventory: Inventory,
}

impl Character {
    /// Create a level-1 character with its class starting stats
    pub fn new(class: CharacterClass, name: impl Into<String>) -> Self {
        Self::with_stats(class, name, class.starting_stats(1))
    }

    /// Create a level-1 character with explicit starting stats
    pub fn with_stats(class: CharacterClass, name: impl Into<String>, stats: BaseStats) -> Self {
        Character {
            name: name.into(),
            class,
            attack: stats.attack,
            defense: stats.defense,
            max_health: stats.health,
            health: stats.health,
            level: 1,
            experience: 0.0,
            crit_chance: DEFAULT_CRIT_CHANCE,
            crit_multiplier: DEFAULT_CRIT_MULTIPLIER,
            equipment: EquipmentSet::new(),
            inventory: Inventory::new(),
        }
    }

    /// Create a bot already at `level`
    ///
    /// `level` must be at least 1.
    pub fn bot(level: u32) -> Self {
        debug_assert!(level >= 1, "bot level must be at least 1");
        let level = level.max(1);
        let mut bot = Self::with_stats(
            CharacterClass::Bot,
            format!("Bot_with_level{level}"),
            class::bot_stats(level),
        );
        bot.level = level;
        bot
    }

    /// Override the critical-hit parameters
    ///
    /// Chance must lie in `[0, 1]` and the multiplier must be at least 1.
    /// Values are stored as given; `validate` reports anything out of range.
    pub fn with_crit(mut self, chance: f64, multiplier: f64) -> Self {
        debug_assert!((0.0..=1.0).contains(&chance), "crit chance {chance} outside [0, 1]");
        debug_assert!(multiplier >= 1.0, "crit multiplier {multiplier} below 1");
        self.crit_chance = chance;
        self.crit_multiplier = multiplier;
        self
    }

    // === Accessors ===

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> CharacterClass {
        self.class
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn experience(&self) -> f64 {
        self.experience
    }

    pub fn base_attack(&self) -> u32 {
        self.attack
    }

    pub fn base_defense(&self) -> u32 {
        self.defense
    }

    pub fn base_max_health(&self) -> u32 {
        self.max_health
    }

    /// Current base health pool, without gear
    pub fn base_health(&self) -> u32 {
        self.health
    }

    pub fn crit_chance(&self) -> f64 {
        self.crit_chance
    }

    pub fn crit_multiplier(&self) -> f64 {
        self.crit_multiplier
    }

    pub fn equipment(&self) -> &EquipmentSet {
        &self.equipment
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    // === Derived stats ===

    pub fn effective_attack(&self) -> u32 {
        self.attack.saturating_add(self.equipment.attack_bonus())
    }

    pub fn effective_defense(&self) -> u32 {
        self.defense.saturating_add(self.equipment.defense_bonus())
    }

    /// Displayed health: base pool plus gear, or 0 once the pool is empty
    ///
    /// Gear health only counts while the character is standing. Hits drain
    /// the base pool alone, so a health bonus neither absorbs damage nor
    /// lets a character survive a blow that empties the base pool.
    pub fn effective_health(&self) -> u32 {
        if self.health == 0 {
            0
        } else {
            self.health.saturating_add(self.equipment.health_bonus())
        }
    }

    /// Effective health ceiling: base maximum plus gear
    pub fn max_effective_health(&self) -> u32 {
        self.max_health.saturating_add(self.equipment.health_bonus())
    }

    pub fn is_alive(&self) -> bool {
        self.effective_health() > 0
    }

    // === Combat ===

    /// Roll an attack, drawing exactly one value from `rng`
    pub fn roll_attack(&self, rng: &mut impl Rng) -> AttackRoll {
        let base = f64::from(self.effective_attack());
        let critical = rng.gen::<f64>() < self.crit_chance;
        let value = if critical { base * self.crit_multiplier } else { base };
        AttackRoll { value, critical }
    }

    /// Take an incoming hit, returning the damage actually dealt
    ///
    /// Damage is `floor(max(0, incoming - effective_defense))` and the base
    /// pool saturates at 0.
    pub fn apply_damage(&mut self, incoming: f64) -> u32 {
        let mitigated = incoming - f64::from(self.effective_defense());
        // f64::max drops NaN in favour of 0.0
        let dealt = mitigated.max(0.0).floor() as u32;
        self.health = self.health.saturating_sub(dealt);
        dealt
    }

    /// Refill the base pool to its maximum
    pub fn restore_health(&mut self) {
        self.health = self.max_health;
    }

    // === Equipment ===

    /// Wear an item; anything it displaces goes to the inventory
    pub fn equip(&mut self, item: Item) {
        tracing::debug!(character = %self.name, item = %item.name(), slot = %item.slot(), "equip");
        if let Some(displaced) = self.equipment.equip(item) {
            tracing::debug!(character = %self.name, item = %displaced.name(), "displaced item returned to inventory");
            self.inventory.add(displaced);
        }
    }

    /// Equip the first carried item named `name`
    ///
    /// Returns `false` and changes nothing when no such item is carried.
    pub fn equip_from_inventory(&mut self, name: &str) -> bool {
        match self.inventory.take_by_name(name) {
            Some(item) => {
                self.equip(item);
                true
            }
            None => false,
        }
    }

    /// Take off an item and put it back in the inventory
    ///
    /// Returns `false` when the item was not equipped.
    pub fn unequip(&mut self, item: &Item) -> bool {
        match self.equipment.unequip(item) {
            Some(removed) => {
                tracing::debug!(character = %self.name, item = %removed.name(), "unequip");
                self.inventory.add(removed);
                true
            }
            None => false,
        }
    }

    // === Progression ===

    /// Apply one level of class growth
    ///
    /// Returns `false` for bots, which never grow past their generated level.
    pub fn level_up(&mut self) -> bool {
        self.level_up_by(1)
    }

    /// Apply `levels` levels of class growth at once
    ///
    /// Same result as calling `level_up` `levels` times, with every stat
    /// saturating at `u32::MAX`.
    pub fn level_up_by(&mut self, levels: u32) -> bool {
        let Some(delta) = self.class.level_deltas() else {
            return false;
        };
        if levels == 0 {
            return true;
        }
        let grow = |per_level: u32| per_level.saturating_mul(levels);
        self.level = self.level.saturating_add(levels);
        self.attack = self.attack.saturating_add(grow(delta.attack));
        self.defense = self.defense.saturating_add(grow(delta.defense));
        self.max_health = self.max_health.saturating_add(grow(delta.health));
        self.health = self.health.saturating_add(grow(delta.health)).min(self.max_health);
        tracing::info!(character = %self.name, level = self.level, levels, "level up");
        true
    }

    /// Check the model invariants
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let name = self.name.clone();
        if self.level == 0 {
            return Err(InvariantViolation::LevelZero { name });
        }
        if self.health > self.max_health {
            return Err(InvariantViolation::HealthAboveMax {
                name,
                health: self.health,
                max: self.max_health,
            });
        }
        if !(0.0..=1.0).contains(&self.crit_chance) {
            return Err(InvariantViolation::CritChanceOutOfRange { name, chance: self.crit_chance });
        }
        if self.crit_multiplier.is_nan() || self.crit_multiplier < 1.0 {
            return Err(InvariantViolation::CritMultiplierBelowOne {
                name,
                multiplier: self.crit_multiplier,
            });
        }
        if !self.experience.is_finite() || self.experience < 0.0 {
            return Err(InvariantViolation::InvalidExperience {
                name,
                experience: self.experience,
            });
        }
        if let Some((slot, item)) = self.equipment.misplaced() {
            return Err(InvariantViolation::MisplacedItem {
                name,
                item: item.name().to_string(),
                slot,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} (Level: {})", self.name, self.level)?;
        writeln!(f, "Health: {}/{}", self.effective_health(), self.max_effective_health())?;
        writeln!(f, "Attack: {}", self.effective_attack())?;
        writeln!(f, "Defense: {}", self.effective_defense())?;
        write!(f, "Experience: {}", self.experience)
    }
}

/// Build a player character from a class name, applying configured crit
pub fn create_character(
    class_name: &str,
    name: impl Into<String>,
    crit: &CritConstants,
) -> Result<Character, UnknownClass> {
    let class: CharacterClass = class_name.parse()?;
    Ok(Character::new(class, name).with_crit(crit.chance, crit.multiplier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::mock::StepRng;

    /// Every draw is 0.0, so any positive crit chance crits
    fn always_crit() -> StepRng {
        StepRng::new(0, 0)
    }

    /// Every draw is just below 1.0, so nothing crits
    fn never_crit() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    #[test]
    fn test_new_uses_class_table() {
        let warrior = Character::new(CharacterClass::Warrior, "Conan");
        assert_eq!(warrior.name(), "Conan");
        assert_eq!(warrior.level(), 1);
        assert_eq!(warrior.effective_attack(), 15);
        assert_eq!(warrior.effective_defense(), 10);
        assert_eq!(warrior.effective_health(), 100);
        assert_eq!(warrior.experience(), 0.0);
        assert!(warrior.validate().is_ok());
    }

    #[test]
    fn test_bot_is_pre_leveled() {
        let bot = Character::bot(4);
        assert_eq!(bot.name(), "Bot_with_level4");
        assert_eq!(bot.level(), 4);
        assert_eq!(bot.effective_attack(), 13);
        assert_eq!(bot.effective_defense(), 10);
        assert_eq!(bot.effective_health(), 66);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "bot level must be at least 1")]
    fn test_bot_level_zero_rejected() {
        let _ = Character::bot(0);
    }

    #[test]
    fn test_effective_stats_include_gear() {
        let mut mage = Character::new(CharacterClass::Mage, "Merlin");
        mage.equip(Item::new("Staff", EquipmentSlot::RightHand).with_attack(4));
        mage.equip(Item::new("Robe", EquipmentSlot::Body).with_defense(2).with_health(15));

        assert_eq!(mage.effective_attack(), 24);
        assert_eq!(mage.effective_defense(), 7);
        assert_eq!(mage.effective_health(), 95);
        assert_eq!(mage.max_effective_health(), 95);
    }

    #[test]
    fn test_roll_attack_crit() {
        let rogue = Character::new(CharacterClass::Rogue, "Vex").with_crit(0.5, 2.0);

        let roll = rogue.roll_attack(&mut always_crit());
        assert!(roll.critical);
        assert!((roll.value - 30.0).abs() < f64::EPSILON);

        let roll = rogue.roll_attack(&mut never_crit());
        assert!(!roll.critical);
        assert!((roll.value - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_crit_chance_never_crits() {
        let rogue = Character::new(CharacterClass::Rogue, "Vex").with_crit(0.0, 3.0);
        assert!(!rogue.roll_attack(&mut always_crit()).critical);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "outside [0, 1]")]
    fn test_with_crit_rejects_chance_above_one() {
        let _ = Character::new(CharacterClass::Mage, "M").with_crit(1.7, 1.5);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "below 1")]
    fn test_with_crit_rejects_small_multiplier() {
        let _ = Character::new(CharacterClass::Mage, "M").with_crit(0.1, 0.2);
    }

    #[test]
    fn test_validate_reports_bad_crit() {
        let mut c = Character::new(CharacterClass::Mage, "M");
        c.crit_chance = 1.7;
        assert!(matches!(c.validate(), Err(InvariantViolation::CritChanceOutOfRange { .. })));

        let mut c = Character::new(CharacterClass::Mage, "M");
        c.crit_multiplier = 0.2;
        assert!(matches!(c.validate(), Err(InvariantViolation::CritMultiplierBelowOne { .. })));
    }

    #[test]
    fn test_health_gear_does_not_absorb_damage() {
        let mut mage = Character::new(CharacterClass::Mage, "Merlin");
        mage.equip(Item::new("Amulet", EquipmentSlot::Ring).with_health(50));
        assert_eq!(mage.effective_health(), 130);

        // 85 - 5 defense = 80, exactly the base pool
        assert_eq!(mage.apply_damage(85.0), 80);
        assert_eq!(mage.base_health(), 0);
        assert_eq!(mage.effective_health(), 0);
        assert!(!mage.is_alive());
    }

    #[test]
    fn test_apply_damage_mitigation() {
        let mut warrior = Character::new(CharacterClass::Warrior, "Conan");
        assert_eq!(warrior.apply_damage(22.5), 12);
        assert_eq!(warrior.base_health(), 88);
        assert_eq!(warrior.apply_damage(10.0), 0);
        assert_eq!(warrior.base_health(), 88);
    }

    #[test]
    fn test_apply_damage_clamps_at_zero() {
        let mut mage = Character::new(CharacterClass::Mage, "Merlin");
        mage.equip(Item::new("Amulet", EquipmentSlot::Ring).with_health(20));
        let dealt = mage.apply_damage(500.0);

        assert_eq!(dealt, 495);
        assert_eq!(mage.base_health(), 0);
        assert_eq!(mage.effective_health(), 0);
        assert!(!mage.is_alive());
    }

    #[test]
    fn test_equip_displaces_into_inventory() {
        let mut paladin = Character::new(CharacterClass::Paladin, "Uther");
        let old = Item::new("Old Helm", EquipmentSlot::Head).with_defense(1);
        let new = Item::new("New Helm", EquipmentSlot::Head).with_defense(3);
        paladin.equip(old.clone());
        paladin.equip(new.clone());

        assert_eq!(paladin.effective_defense(), 15);
        assert!(paladin.inventory().contains(&old));
        assert!(!paladin.inventory().contains(&new));
    }

    #[test]
    fn test_equip_from_inventory_moves_item() {
        let mut rogue = Character::new(CharacterClass::Rogue, "Vex");
        rogue.inventory_mut().add(Item::new("Dagger", EquipmentSlot::LeftHand).with_attack(2));

        assert!(rogue.equip_from_inventory("Dagger"));
        assert!(rogue.inventory().is_empty());
        assert_eq!(rogue.effective_attack(), 17);
        assert!(!rogue.equip_from_inventory("Dagger"));
    }

    #[test]
    fn test_unequip_returns_to_inventory() {
        let mut rogue = Character::new(CharacterClass::Rogue, "Vex");
        let boots = Item::new("Boots", EquipmentSlot::Feet).with_defense(2);
        rogue.equip(boots.clone());

        assert!(rogue.unequip(&boots));
        assert!(rogue.inventory().contains(&boots));
        assert!(!rogue.unequip(&boots));
        assert_eq!(rogue.inventory().len(), 1);
    }

    #[test]
    fn test_level_up_applies_deltas() {
        let mut warrior = Character::new(CharacterClass::Warrior, "Conan");
        warrior.apply_damage(40.0);
        assert!(warrior.level_up());

        assert_eq!(warrior.level(), 2);
        assert_eq!(warrior.base_attack(), 18);
        assert_eq!(warrior.base_defense(), 12);
        assert_eq!(warrior.base_max_health(), 110);
        assert_eq!(warrior.base_health(), 80);
    }

    #[test]
    fn test_level_up_by_matches_repeated_level_up() {
        let mut stepped = Character::new(CharacterClass::Paladin, "Uther");
        stepped.apply_damage(60.0);
        let mut bulk = stepped.clone();
        for _ in 0..5 {
            stepped.level_up();
        }
        assert!(bulk.level_up_by(5));
        assert_eq!(bulk, stepped);
    }

    #[test]
    fn test_level_up_by_saturates() {
        let mut mage = Character::new(CharacterClass::Mage, "Merlin");
        assert!(mage.level_up_by(u32::MAX));
        assert_eq!(mage.level(), u32::MAX);
        assert_eq!(mage.base_max_health(), u32::MAX);
        assert!(mage.validate().is_ok());
    }

    #[test]
    fn test_bot_level_up_is_noop() {
        let mut bot = Character::bot(3);
        let before = bot.clone();
        assert!(!bot.level_up());
        assert_eq!(bot, before);
    }

    #[test]
    fn test_restore_health() {
        let mut mage = Character::new(CharacterClass::Mage, "Merlin");
        mage.apply_damage(50.0);
        mage.restore_health();
        assert_eq!(mage.base_health(), 80);
    }

    #[test]
    fn test_validate_rejects_bad_state() {
        let mut c = Character::new(CharacterClass::Mage, "Broken");
        c.level = 0;
        assert!(matches!(c.validate(), Err(InvariantViolation::LevelZero { .. })));

        let mut c = Character::new(CharacterClass::Mage, "Broken");
        c.health = c.max_health + 1;
        assert!(matches!(c.validate(), Err(InvariantViolation::HealthAboveMax { .. })));

        let mut c = Character::new(CharacterClass::Mage, "Broken");
        c.experience = -1.0;
        assert!(matches!(c.validate(), Err(InvariantViolation::InvalidExperience { .. })));
    }

    #[test]
    fn test_create_character_by_name() {
        let crit = CritConstants { chance: 0.25, multiplier: 2.0 };
        let paladin = create_character("Paladin", "Uther", &crit).unwrap();
        assert_eq!(paladin.class(), CharacterClass::Paladin);
        assert_eq!(paladin.crit_chance(), 0.25);
        assert!(create_character("bard", "Dandelion", &crit).is_err());
    }

    #[test]
    fn test_display() {
        let warrior = Character::new(CharacterClass::Warrior, "Conan");
        let text = warrior.to_string();
        assert!(text.starts_with("Conan (Level: 1)"));
        assert!(text.contains("Health: 100/100"));
        assert!(text.contains("Defense: 10"));
    }

    fn any_slot() -> impl Strategy<Value = EquipmentSlot> {
        prop::sample::select(EquipmentSlot::all().to_vec())
    }

    proptest! {
        #[test]
        fn prop_effective_health_never_negative(
            hits in prop::collection::vec(0.0f64..500.0, 0..40),
            health_bonus in 0u32..50,
        ) {
            let mut warrior = Character::new(CharacterClass::Warrior, "Conan");
            warrior.equip(Item::new("Charm", EquipmentSlot::Ring).with_health(health_bonus));
            for hit in hits {
                warrior.apply_damage(hit);
                prop_assert!(warrior.base_health() <= warrior.base_max_health());
                prop_assert!(warrior.effective_health() <= warrior.max_effective_health());
            }
        }

        #[test]
        fn prop_hits_below_defense_do_nothing(fraction in 0.0f64..=1.0, defense_bonus in 0u32..20) {
            let mut paladin = Character::new(CharacterClass::Paladin, "Uther");
            paladin.equip(Item::new("Shield", EquipmentSlot::LeftHand).with_defense(defense_bonus));
            let incoming = f64::from(paladin.effective_defense()) * fraction;
            let before = paladin.effective_health();

            prop_assert_eq!(paladin.apply_damage(incoming), 0);
            prop_assert_eq!(paladin.effective_health(), before);
        }

        #[test]
        fn prop_equip_unequip_round_trip(
            slot in any_slot(),
            attack in 0u32..100,
            defense in 0u32..100,
            health in 0u32..100,
        ) {
            let mut mage = Character::new(CharacterClass::Mage, "Merlin");
            let before = (mage.effective_attack(), mage.effective_defense(), mage.effective_health());

            let item = Item::new("Trinket", slot)
                .with_attack(attack)
                .with_defense(defense)
                .with_health(health);
            mage.equip(item.clone());
            prop_assert!(mage.unequip(&item));

            prop_assert_eq!(
                (mage.effective_attack(), mage.effective_defense(), mage.effective_health()),
                before
            );
            prop_assert!(mage.equipment().is_empty());
        }
    }
}
