//! Error types for the stores.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while reading or writing stored data.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record exists for this character in this system.
    #[error("character '{name}' not found for system {system} (expected {})", path.display())]
    CharacterNotFound {
        /// Name as requested.
        name: String,
        /// System key.
        system: String,
        /// Where the record was looked for.
        path: PathBuf,
    },

    /// The group has not chosen a game system yet.
    #[error("no active game system for group '{0}'; pick one with `tirada set-system`")]
    NoActiveSystem(String),

    /// The dice style is not in the style list.
    #[error("unknown dice style '{style}' (available: {})", available.join(", "))]
    UnknownDiceStyle {
        /// Requested style.
        style: String,
        /// Known styles.
        available: Vec<String>,
    },

    /// A record was rejected before saving.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// Writing data failed.
    #[error("cannot save {}: {source}", path.display())]
    Persistence {
        /// Target file.
        path: PathBuf,
        /// Underlying failure.
        source: std::io::Error,
    },

    /// Reading data failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored file is not valid JSON for its type.
    #[error("malformed data: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file is not valid TOML.
    #[error("malformed config: {0}")]
    Config(#[from] toml::de::Error),

    /// An error from the mechanics engine.
    #[error(transparent)]
    Mechanics(#[from] td_mechanics::MechError),
}
