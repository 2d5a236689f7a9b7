//! Random item drops

use rand::seq::SliceRandom;
use rand::Rng;
use rpg_core::{EquipmentSlot, Item};

/// Chance that a won fight drops an item
pub const DROP_CHANCE: f64 = 0.2;

/// A random item with bonuses in `0..=5`
pub fn random_item(rng: &mut impl Rng) -> Item {
    let slot = *EquipmentSlot::all()
        .choose(rng)
        .unwrap_or(&EquipmentSlot::Ring);
    Item::new(format!("Item_{}", rng.gen_range(1..=100)), slot)
        .with_attack(rng.gen_range(0..=5))
        .with_defense(rng.gen_range(0..=5))
        .with_health(rng.gen_range(0..=5))
}

/// Roll for a drop: three candidates are rolled and one is kept
pub fn roll_drop(rng: &mut impl Rng) -> Option<Item> {
    if rng.gen::<f64>() >= DROP_CHANCE {
        return None;
    }
    let mut candidates: Vec<Item> = (0..3).map(|_| random_item(rng)).collect();
    let pick = rng.gen_range(0..candidates.len());
    Some(candidates.swap_remove(pick))
}
