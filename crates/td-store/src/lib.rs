//! File-backed collaborators for the Tirada engine.
//!
//! Character records, per-group settings, the dice-style list, dice-face
//! lookups and the configuration that says where all of them live. Every
//! write goes through a temp file and a rename.

pub mod characters;
pub mod config;
pub mod error;
pub mod faces;
mod fsutil;
pub mod settings;
pub mod styles;

pub use characters::CharacterStore;
pub use config::{DEFAULT_DICE_STYLE, TiradaConfig};
pub use error::{StoreError, StoreResult};
pub use faces::{DiceFaces, DieFace};
pub use settings::{GroupSettings, SettingsStore};
pub use styles::{DiceStyles, effective_style};
