//! Content factory for building registries from data files.

use std::path::{Path, PathBuf};

use creature_core::AiConfig;

use crate::loaders::{
    AbilityListRegistry, ConfigLoader, CreatureLoader, CreatureSpawn, LoadResult, SpellRegistry,
};

/// Content factory that loads all creature content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── spells.ron
/// ├── ability_lists.ron
/// └── creatures.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load AI configuration from `config.toml`, or defaults if absent.
    pub fn load_config(&self) -> LoadResult<AiConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(AiConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the spell catalog from `spells.ron`.
    pub fn load_spells(&self) -> LoadResult<SpellRegistry> {
        let path = self.data_dir.join("spells.ron");
        SpellRegistry::load(&path)
    }

    /// Load ability lists from `ability_lists.ron`.
    pub fn load_ability_lists(&self) -> LoadResult<AbilityListRegistry> {
        let path = self.data_dir.join("ability_lists.ron");
        AbilityListRegistry::load(&path)
    }

    /// Load creature placements from `creatures.ron`.
    pub fn load_creatures(&self) -> LoadResult<Vec<CreatureSpawn>> {
        let path = self.data_dir.join("creatures.ron");
        CreatureLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
