pub mod characters;
pub mod check;
pub mod dice_style;
pub mod roll;
pub mod set_system;
pub mod suggest;
pub mod systems;

use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;
use td_mechanics::Catalog;
use td_store::{CharacterStore, DiceFaces, DiceStyles, SettingsStore, TiradaConfig};

/// Configuration plus the stores every command draws from.
pub struct Context {
    pub config: TiradaConfig,
    seed: Option<u64>,
}

impl Context {
    /// Read the config file (if any) and apply command-line overrides.
    pub fn load(
        config_path: Option<&Path>,
        data_dir: Option<PathBuf>,
        seed: Option<u64>,
    ) -> Result<Self, String> {
        let mut config = match config_path {
            Some(path) => TiradaConfig::load(path)
                .map_err(|e| format!("cannot read config {}: {e}", path.display()))?,
            None => TiradaConfig::default(),
        };
        if let Some(dir) = data_dir {
            config = config.with_data_dir(dir);
        }
        tracing::debug!(data_dir = %config.data_dir.display(), "configuration loaded");
        Ok(Self { config, seed })
    }

    pub fn catalog(&self) -> Result<Catalog, String> {
        self.config.load_catalog().map_err(|e| e.to_string())
    }

    pub fn characters(&self) -> CharacterStore {
        CharacterStore::new(self.config.characters_dir())
    }

    pub fn settings(&self) -> SettingsStore {
        SettingsStore::new(self.config.settings_path())
    }

    pub fn styles(&self) -> Result<DiceStyles, String> {
        DiceStyles::load(&self.config.dice_styles_path()).map_err(|e| e.to_string())
    }

    pub fn faces(&self) -> DiceFaces {
        DiceFaces::new(&self.config.assets_dir)
    }

    /// The named group, or the configured default.
    pub fn group<'a>(&'a self, group: Option<&'a str>) -> &'a str {
        group.unwrap_or(&self.config.default_group)
    }

    /// The catalog's key for an explicit system, or for the group's
    /// active one. Unknown systems are an error.
    pub fn system_key(
        &self,
        catalog: &Catalog,
        system: Option<&str>,
        group: &str,
    ) -> Result<String, String> {
        let requested = match system {
            Some(key) => key.to_string(),
            None => self
                .settings()
                .active_system(group)
                .map_err(|e| e.to_string())?,
        };
        catalog
            .get(&requested)
            .map(|definition| definition.key.clone())
            .map_err(|e| e.to_string())
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
