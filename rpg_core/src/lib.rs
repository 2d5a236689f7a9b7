//! rpg_core - Combat, progression and equipment core for a minimal RPG
//!
//! This library provides:
//! - Character: class-driven base stats, gear, inventory and level growth
//! - EquipmentSet / Inventory: worn and carried items
//! - Combat: deterministic turn loop with a critical-hit roll
//! - Progression: level-ratio experience awards and level-ups
//! - Session: versioned whole-roster save/load
//!
//! Nothing here runs at load time; callers drive everything through the
//! functions below and pass in their own `rand::Rng`.

pub mod character;
pub mod combat;
pub mod config;
pub mod equipment;
pub mod inventory;
pub mod item;
pub mod prelude;
pub mod progression;
pub mod session;
pub mod types;

// Re-export core types for convenience
pub use character::{create_character, generate_opponent, AttackRoll, BaseStats, Character, InvariantViolation};
pub use combat::{fight, resolve, Combat, CombatState, FightOutcome, Strike, TurnRecord};
pub use config::{ConfigError, GameConstants};
pub use equipment::EquipmentSet;
pub use inventory::Inventory;
pub use item::Item;
pub use progression::{award_experience, LevelReport};
pub use session::{Roster, SessionError};
pub use types::{CharacterClass, EquipmentSlot};
