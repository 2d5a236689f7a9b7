//! Inventory - Unordered bag of carried items

use crate::item::Item;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Items a character carries but does not wear
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Remove one copy of an item, returning it if it was carried
    pub fn remove(&mut self, item: &Item) -> Option<Item> {
        let index = self.items.iter().position(|carried| carried == item)?;
        Some(self.items.swap_remove(index))
    }

    /// Remove the first item with the given name
    pub fn take_by_name(&mut self, name: &str) -> Option<Item> {
        let index = self.items.iter().position(|carried| carried.name() == name)?;
        Some(self.items.swap_remove(index))
    }

    pub fn contains(&self, item: &Item) -> bool {
        self.items.contains(item)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.items.iter().map(Item::name).collect();
        f.write_str(&names.join(", "))
    }
}
