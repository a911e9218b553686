//! JSON file helpers shared by the stores.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

use crate::error::{StoreError, StoreResult};

/// Read a JSON file, returning `None` if it does not exist.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> StoreResult<Option<T>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Write `value` as pretty JSON by filling a temp file in the target's
/// directory and renaming it over the target.
///
/// Readers see either the old or the new file, never a partial one.
/// Concurrent writers still race: the last rename wins.
pub(crate) fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> StoreResult<()> {
    let persistence = |source: std::io::Error| StoreError::Persistence {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir).map_err(persistence)?;

    let json = serde_json::to_string_pretty(value)?;
    let mut tmp = NamedTempFile::new_in(&dir).map_err(persistence)?;
    tmp.write_all(json.as_bytes()).map_err(persistence)?;
    tmp.write_all(b"\n").map_err(persistence)?;
    tmp.as_file().sync_all().map_err(persistence)?;
    tmp.persist(path).map_err(|e| persistence(e.error))?;

    tracing::debug!(path = %path.display(), "saved");
    Ok(())
}
