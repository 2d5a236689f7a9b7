//! Game constants loaded from TOML

mod constants;

pub use constants::{CombatConstants, CritConstants, GameConstants, ProgressionConstants};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a set of game constants could not be used
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read constants file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed game constants: {0}")]
    Malformed(#[from] toml::de::Error),
    #[error("{field}: {reason}")]
    OutOfRange { field: &'static str, reason: String },
}

/// Parse and validate game constants from TOML text
///
/// Missing sections and keys fall back to their defaults.
pub fn parse_constants(content: &str) -> Result<GameConstants, ConfigError> {
    let constants: GameConstants = toml::from_str(content)?;
    constants.validate()?;
    Ok(constants)
}

/// Load and validate game constants from a TOML file
pub fn load_constants(path: &Path) -> Result<GameConstants, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let constants = parse_constants(&content)?;
    tracing::info!(path = %path.display(), "loaded game constants");
    Ok(constants)
}
