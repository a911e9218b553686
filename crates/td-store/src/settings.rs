//! Per-group settings: the active game system and the group's dice style.
//!
//! All groups share one JSON file keyed by group id. Every write replaces the
//! whole file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use td_mechanics::Catalog;

use crate::error::{StoreError, StoreResult};
use crate::fsutil;

/// Settings for one group (a server, a table, a campaign).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSettings {
    /// Key of the system checks resolve against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_system: Option<String>,
    /// Dice style for members without their own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dice_style: Option<String>,
}

/// Reads and writes the group settings file.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// A store backed by `path`. A missing file means no group has settings.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every group's settings.
    pub fn load_all(&self) -> StoreResult<BTreeMap<String, GroupSettings>> {
        Ok(fsutil::read_json(&self.path)?.unwrap_or_default())
    }

    /// One group's settings, empty if the group has none.
    pub fn get(&self, group: &str) -> StoreResult<GroupSettings> {
        Ok(self.load_all()?.remove(group).unwrap_or_default())
    }

    /// The group's active system key.
    pub fn active_system(&self, group: &str) -> StoreResult<String> {
        self.get(group)?
            .active_system
            .ok_or_else(|| StoreError::NoActiveSystem(group.to_string()))
    }

    /// Make `key` the group's active system. The key must exist in the
    /// catalog; the catalog's spelling of it is stored and returned.
    pub fn set_active_system(&self, group: &str, key: &str, catalog: &Catalog) -> StoreResult<String> {
        let canonical = catalog.get(key)?.key.clone();
        self.update(group, |settings| {
            settings.active_system = Some(canonical.clone());
        })?;
        tracing::info!(group, system = %canonical, "active system changed");
        Ok(canonical)
    }

    /// Set or clear the group's dice style.
    pub fn set_dice_style(&self, group: &str, style: Option<String>) -> StoreResult<()> {
        tracing::info!(group, style = ?style, "group dice style changed");
        self.update(group, |settings| settings.dice_style = style)
    }

    fn update(&self, group: &str, change: impl FnOnce(&mut GroupSettings)) -> StoreResult<()> {
        let mut all = self.load_all()?;
        change(all.entry(group.to_string()).or_default());
        fsutil::write_json_atomic(&self.path, &all)
    }
}
