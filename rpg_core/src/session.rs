//! Session store - Versioned whole-roster persistence
//!
//! A snapshot is a JSON document:
//!
//! ```text
//! { "schema_version": 1, "characters": [ { "name": ..., "equipment": ..., "inventory": ... } ] }
//! ```
//!
//! Loading checks the version before touching the character records and
//! validates every restored character.

use crate::character::{Character, InvariantViolation};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Current snapshot format version
pub const SCHEMA_VERSION: u32 = 1;

/// Errors that can occur while saving or loading a roster
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Malformed roster snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Incompatible roster schema: expected version {expected}, found {found}")]
    IncompatibleSchema { expected: u32, found: u32 },
    #[error("Invalid character in snapshot: {0}")]
    Invariant(#[from] InvariantViolation),
    #[error("Failed to access snapshot file: {0}")]
    Io(#[from] std::io::Error),
}

/// Ordered set of known characters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    characters: Vec<Character>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a character, returning its index
    pub fn add(&mut self, character: Character) -> usize {
        self.characters.push(character);
        self.characters.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Character> {
        self.characters.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Character> {
        self.characters.get_mut(index)
    }

    /// First character with the given name
    pub fn find(&self, name: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.name() == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Character> {
        self.characters.iter_mut().find(|c| c.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter()
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

impl FromIterator<Character> for Roster {
    fn from_iter<I: IntoIterator<Item = Character>>(iter: I) -> Self {
        Roster {
            characters: iter.into_iter().collect(),
        }
    }
}

#[derive(Serialize)]
struct SnapshotOut<'a> {
    schema_version: u32,
    characters: &'a [Character],
}

#[derive(Deserialize)]
struct SnapshotHeader {
    schema_version: u32,
}

#[derive(Deserialize)]
struct SnapshotIn {
    characters: Vec<Character>,
}

/// Serialize the whole roster
pub fn save(roster: &Roster) -> Result<Vec<u8>, SessionError> {
    let snapshot = SnapshotOut {
        schema_version: SCHEMA_VERSION,
        characters: &roster.characters,
    };
    let bytes = serde_json::to_vec_pretty(&snapshot)?;
    tracing::info!(characters = roster.len(), bytes = bytes.len(), "roster saved");
    Ok(bytes)
}

/// Restore a roster from a snapshot produced by [`save`]
pub fn load(bytes: &[u8]) -> Result<Roster, SessionError> {
    let header: SnapshotHeader = serde_json::from_slice(bytes)?;
    if header.schema_version != SCHEMA_VERSION {
        return Err(SessionError::IncompatibleSchema {
            expected: SCHEMA_VERSION,
            found: header.schema_version,
        });
    }

    let snapshot: SnapshotIn = serde_json::from_slice(bytes)?;
    for character in &snapshot.characters {
        character.validate()?;
    }
    tracing::info!(characters = snapshot.characters.len(), "roster loaded");
    Ok(Roster {
        characters: snapshot.characters,
    })
}

/// Save the roster to a file, replacing it
pub fn save_to_path(roster: &Roster, path: &Path) -> Result<(), SessionError> {
    let bytes = save(roster)?;
    fs::write(path, bytes)?;
    tracing::debug!(path = %path.display(), "snapshot written");
    Ok(())
}

/// Load a roster from a file written by [`save_to_path`]
pub fn load_from_path(path: &Path) -> Result<Roster, SessionError> {
    let bytes = fs::read(path)?;
    load(&bytes)
}
