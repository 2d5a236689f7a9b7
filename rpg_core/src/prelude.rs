//! Prelude module for convenient imports
//!
//! ```rust
//! use rpg_core::prelude::*;
//! ```

// Core types
pub use crate::character::{BaseStats, Character};
pub use crate::item::Item;
pub use crate::types::{CharacterClass, EquipmentSlot};

// Combat
pub use crate::combat::{fight, resolve, CombatState, FightOutcome};

// Progression
pub use crate::progression::award_experience;

// Persistence
pub use crate::session::Roster;

// Config
pub use crate::config::GameConstants;
