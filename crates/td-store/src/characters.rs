//! Character records on disk, one JSON file per character and system.
//!
//! Files are named `<normalized name>_<system key>.json`, so "Garra" in
//! `dnd5e` lives in `garra_dnd5e.json`.

use std::path::PathBuf;

use td_mechanics::suggest::{self, Choice};
use td_mechanics::{CharacterRecord, normalize_key};

use crate::error::{StoreError, StoreResult};
use crate::fsutil;

/// Reads and writes character records under one directory.
#[derive(Debug, Clone)]
pub struct CharacterStore {
    dir: PathBuf,
}

impl CharacterStore {
    /// A store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File name for a character in a system.
    pub fn file_name(name: &str, system: &str) -> String {
        format!("{}_{system}.json", normalize_key(name))
    }

    /// Full path for a character in a system.
    ///
    /// Names and keys that would leave the store directory are rejected.
    pub fn path(&self, name: &str, system: &str) -> StoreResult<PathBuf> {
        let key = normalize_key(name);
        if key.is_empty() {
            return Err(StoreError::InvalidRecord("character has no name".to_string()));
        }
        if system.trim().is_empty() {
            return Err(StoreError::InvalidRecord(format!(
                "character '{name}' has no system"
            )));
        }
        for part in [key.as_str(), system] {
            if part.contains(['/', '\\']) || part.contains("..") {
                return Err(StoreError::InvalidRecord(format!(
                    "'{part}' cannot be used in a file name"
                )));
            }
        }
        Ok(self.dir.join(Self::file_name(name, system)))
    }

    /// Load a record, or `None` if there is no file for it.
    pub fn find(&self, name: &str, system: &str) -> StoreResult<Option<CharacterRecord>> {
        let path = self.path(name, system)?;
        let record = fsutil::read_json::<CharacterRecord>(&path)?;
        tracing::debug!(path = %path.display(), found = record.is_some(), "character lookup");
        Ok(record)
    }

    /// Load a record, failing with [`StoreError::CharacterNotFound`].
    pub fn load(&self, name: &str, system: &str) -> StoreResult<CharacterRecord> {
        match self.find(name, system)? {
            Some(record) => Ok(record),
            None => Err(StoreError::CharacterNotFound {
                name: name.to_string(),
                system: system.to_string(),
                path: self.path(name, system)?,
            }),
        }
    }

    /// Write a record to the file its own name and system point at.
    pub fn save(&self, record: &CharacterRecord) -> StoreResult<PathBuf> {
        self.save_as(&record.name, &record.system, record)
    }

    /// Write a record to the file for `name` in `system`, whatever the
    /// record's own fields say. Returns the path written.
    pub fn save_as(
        &self,
        name: &str,
        system: &str,
        record: &CharacterRecord,
    ) -> StoreResult<PathBuf> {
        let path = self.path(name, system)?;
        fsutil::write_json_atomic(&path, record)?;
        Ok(path)
    }

    /// Normalized names of every character stored for a system, sorted.
    pub fn list(&self, system: &str) -> StoreResult<Vec<String>> {
        let suffix = format!("_{system}.json");
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let file_name = entry?.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if let Some(name) = file_name.strip_suffix(&suffix)
                && !name.is_empty()
            {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Autocomplete choices for characters in a system.
    ///
    /// Listing failures degrade to an empty list.
    pub fn choices(&self, system: &str, typed: &str) -> Vec<Choice> {
        match self.list(system) {
            Ok(names) => suggest::filter_choices(
                names
                    .into_iter()
                    .map(|n| Choice::new(suggest::display_name(&n), n))
                    .collect(),
                typed,
            ),
            Err(e) => {
                tracing::warn!(error = %e, dir = %self.dir.display(), "cannot list characters");
                Vec::new()
            }
        }
    }
}
