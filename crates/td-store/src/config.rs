//! Configuration for file locations and roll limits.
//!
//! Defaults work from the current directory. A TOML file can override any
//! field; the binary then layers command-line flags on top with the `with_*`
//! builders.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use td_mechanics::{Catalog, RollPolicy};

use crate::error::StoreResult;

/// Default dice style when neither character nor group picks one.
pub const DEFAULT_DICE_STYLE: &str = "polyhedral_3d_blue_and_white";

/// Where data lives and how free rolls are limited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiradaConfig {
    /// Root of the data directory.
    pub data_dir: PathBuf,
    /// Game-system catalog file (default: `<data_dir>/game_systems.json`).
    pub catalog_path: Option<PathBuf>,
    /// Root of the dice-face image tree.
    pub assets_dir: PathBuf,
    /// Style used when neither character nor group sets one.
    pub default_dice_style: String,
    /// Group used when a command names none.
    pub default_group: String,
    /// Dice ceiling for free rolls.
    pub free_roll_max_dice: u32,
}

impl Default for TiradaConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            catalog_path: None,
            assets_dir: PathBuf::from("assets/dice_images"),
            default_dice_style: DEFAULT_DICE_STYLE.to_string(),
            default_group: "default".to_string(),
            free_roll_max_dice: 10,
        }
    }
}

impl TiradaConfig {
    /// Parse a TOML config. Missing fields keep their defaults.
    pub fn from_toml(source: &str) -> StoreResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Read a TOML config file.
    pub fn load(path: &Path) -> StoreResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml(&source)
    }

    /// Set the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the catalog file.
    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }

    /// Set the default group.
    pub fn with_default_group(mut self, group: impl Into<String>) -> Self {
        self.default_group = group.into();
        self
    }

    /// The catalog file in effect.
    pub fn catalog_path(&self) -> PathBuf {
        self.catalog_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join("game_systems.json"))
    }

    /// Directory holding one JSON file per character.
    pub fn characters_dir(&self) -> PathBuf {
        self.data_dir.join("characters")
    }

    /// Group settings file.
    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join("server_settings.json")
    }

    /// Dice style list file.
    pub fn dice_styles_path(&self) -> PathBuf {
        self.data_dir.join("dice_styles.json")
    }

    /// Limits for free rolls.
    pub fn roll_policy(&self) -> RollPolicy {
        RollPolicy::free_roll().with_max_dice(self.free_roll_max_dice)
    }

    /// Load the catalog file, or the built-in systems if there is none.
    pub fn load_catalog(&self) -> StoreResult<Catalog> {
        let path = self.catalog_path();
        if path.exists() {
            Ok(Catalog::load(&path)?)
        } else {
            tracing::info!(path = %path.display(), "no catalog file, using built-in systems");
            Ok(Catalog::builtin())
        }
    }
}
