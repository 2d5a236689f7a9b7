//! EquipmentSet - One optional item per slot

use crate::item::Item;
use crate::types::EquipmentSlot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Items currently worn by a character
///
/// Items are owned by value, so the same item can never occupy two slots.
/// Bonus totals are recomputed on every call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquipmentSet {
    slots: BTreeMap<EquipmentSlot, Item>,
}

impl EquipmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place an item in its slot, returning whatever was there before
    pub fn equip(&mut self, item: Item) -> Option<Item> {
        self.slots.insert(item.slot(), item)
    }

    /// Remove the given item if it is currently equipped
    ///
    /// Returns `None` (and changes nothing) when the item is not worn.
    pub fn unequip(&mut self, item: &Item) -> Option<Item> {
        if self.slots.get(&item.slot()) == Some(item) {
            self.slots.remove(&item.slot())
        } else {
            None
        }
    }

    /// Clear a slot, returning its item if present
    pub fn unequip_slot(&mut self, slot: EquipmentSlot) -> Option<Item> {
        self.slots.remove(&slot)
    }

    /// Get a reference to the item equipped in a slot
    pub fn get(&self, slot: EquipmentSlot) -> Option<&Item> {
        self.slots.get(&slot)
    }

    pub fn is_equipped(&self, item: &Item) -> bool {
        self.slots.get(&item.slot()) == Some(item)
    }

    /// Get all equipped items in slot order
    pub fn iter(&self) -> impl Iterator<Item = (&EquipmentSlot, &Item)> {
        self.slots.iter()
    }

    /// First entry whose item belongs to a different slot
    ///
    /// Only reachable through deserialization; `equip` always files items
    /// under their own slot.
    pub fn misplaced(&self) -> Option<(EquipmentSlot, &Item)> {
        self.slots
            .iter()
            .find(|(slot, item)| item.slot() != **slot)
            .map(|(slot, item)| (*slot, item))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn attack_bonus(&self) -> u32 {
        self.slots.values().map(Item::attack_bonus).sum()
    }

    pub fn defense_bonus(&self) -> u32 {
        self.slots.values().map(Item::defense_bonus).sum()
    }

    pub fn health_bonus(&self) -> u32 {
        self.slots.values().map(Item::health_bonus).sum()
    }
}
