//! Combat resolution - Turn loop between two characters

mod resolution;
mod result;

pub use resolution::{fight, resolve, Combat};
pub use result::{CombatState, FightOutcome, Strike, TurnRecord};
