//! The catalog of known game systems.
//!
//! A [`Catalog`] is an immutable snapshot: once built it never changes.
//! [`CatalogHandle`] is the shared cell that hands snapshots out and swaps in
//! a freshly built catalog on reload, so a resolution that grabbed a snapshot
//! keeps seeing the same systems until it finishes.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;

use super::{GameSystemDefinition, RawDefinition, preset};
use crate::error::{MechError, MechResult};

/// A definition that was dropped while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedSystem {
    /// Key of the dropped system.
    pub key: String,
    /// Why it was dropped.
    pub reason: String,
}

/// Validated game-system definitions keyed by system key.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    systems: BTreeMap<String, GameSystemDefinition>,
    rejected: Vec<RejectedSystem>,
}

impl Catalog {
    /// Build a catalog from already validated definitions.
    pub fn from_definitions(definitions: impl IntoIterator<Item = GameSystemDefinition>) -> Self {
        Self {
            systems: definitions
                .into_iter()
                .map(|d| (d.key.clone(), d))
                .collect(),
            rejected: Vec::new(),
        }
    }

    /// The reference systems that ship with the engine.
    pub fn builtin() -> Self {
        Self::from_definitions([preset::dnd5e(), preset::cyberpunk_red()])
    }

    /// Parse a JSON object mapping system keys to definitions.
    ///
    /// A source that is not a JSON object fails the whole load. Individual
    /// definitions that fail to parse or validate are dropped with a warning
    /// and listed in [`Catalog::rejected`].
    pub fn from_json(source: &str) -> MechResult<Self> {
        let value: Value =
            serde_json::from_str(source).map_err(|e| MechError::CatalogLoad(e.to_string()))?;
        let Value::Object(entries) = value else {
            return Err(MechError::CatalogLoad(
                "expected an object of game systems".to_string(),
            ));
        };

        let mut catalog = Self::default();
        for (key, entry) in entries {
            let parsed = serde_json::from_value::<RawDefinition>(entry)
                .map_err(|e| MechError::InvalidDefinition {
                    system: key.clone(),
                    reason: e.to_string(),
                })
                .and_then(|raw| GameSystemDefinition::from_raw(&key, raw));

            match parsed {
                Ok(definition) => {
                    catalog.systems.insert(key, definition);
                }
                Err(e) => {
                    tracing::warn!(system = %key, error = %e, "dropping game system");
                    catalog.rejected.push(RejectedSystem {
                        key,
                        reason: e.to_string(),
                    });
                }
            }
        }

        tracing::debug!(
            loaded = catalog.systems.len(),
            rejected = catalog.rejected.len(),
            "game systems loaded"
        );
        Ok(catalog)
    }

    /// Read and parse a catalog file.
    pub fn load(path: &Path) -> MechResult<Self> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| MechError::CatalogLoad(format!("{}: {e}", path.display())))?;
        Self::from_json(&source)
    }

    /// Look up a system by key (exact, then case-insensitive).
    pub fn get(&self, key: &str) -> MechResult<&GameSystemDefinition> {
        self.systems
            .get(key)
            .or_else(|| {
                self.systems
                    .values()
                    .find(|d| d.key.eq_ignore_ascii_case(key))
            })
            .ok_or_else(|| MechError::UnknownSystem {
                key: key.to_string(),
                available: self.keys(),
            })
    }

    /// True if the catalog has a system with this key.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_ok()
    }

    /// All system keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        self.systems.keys().cloned().collect()
    }

    /// Iterate over definitions in key order.
    pub fn iter(&self) -> impl Iterator<Item = &GameSystemDefinition> {
        self.systems.values()
    }

    /// Number of systems.
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Whether the catalog has no systems.
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Definitions dropped during loading.
    pub fn rejected(&self) -> &[RejectedSystem] {
        &self.rejected
    }
}

/// Shared access to the current catalog snapshot.
#[derive(Debug, Default)]
pub struct CatalogHandle {
    current: RwLock<Arc<Catalog>>,
}

impl CatalogHandle {
    /// Wrap an initial catalog.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// The current snapshot. Later reloads do not affect it.
    pub fn snapshot(&self) -> Arc<Catalog> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Swap in a new catalog, returning the previous snapshot.
    pub fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        let next = Arc::new(catalog);
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *current, next)
    }

    /// Reload from a file. On failure the current snapshot stays in place.
    pub fn reload(&self, path: &Path) -> MechResult<Arc<Catalog>> {
        let catalog = Catalog::load(path)?;
        self.replace(catalog);
        Ok(self.snapshot())
    }
}
