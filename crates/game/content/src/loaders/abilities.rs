//! Ability list loader and registry.
//!
//! Lists are stored raw; spell resolution happens per creature through
//! `creature_core::AbilityCatalog`, so a list may reference spells that are
//! missing from the catalog without failing the load.

use std::collections::HashMap;
use std::path::Path;

use creature_core::{AbilityListId, AbilityListOracle, RawAbilityEntry};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One named list of raw ability entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityListSpec {
    pub id: AbilityListId,
    #[serde(default)]
    pub entries: Vec<RawAbilityEntry>,
}

/// Ability list file structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityListFile {
    pub lists: Vec<AbilityListSpec>,
}

/// Loader for ability lists from RON files.
pub struct AbilityListLoader;

impl AbilityListLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<AbilityListSpec>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<AbilityListSpec>> {
        let file: AbilityListFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse ability list RON: {}", e))?;

        Ok(file.lists)
    }
}

/// Read-only store of raw ability lists keyed by list id.
#[derive(Debug, Clone, Default)]
pub struct AbilityListRegistry {
    lists: HashMap<AbilityListId, Vec<RawAbilityEntry>>,
}

impl AbilityListRegistry {
    /// Builds a registry, rejecting duplicate list ids.
    pub fn from_specs(specs: impl IntoIterator<Item = AbilityListSpec>) -> LoadResult<Self> {
        let mut lists = HashMap::new();
        for spec in specs {
            if lists.insert(spec.id, spec.entries).is_some() {
                anyhow::bail!("Duplicate ability list id {}", spec.id.0);
            }
        }
        Ok(Self { lists })
    }

    pub fn load(path: &Path) -> LoadResult<Self> {
        Self::from_specs(AbilityListLoader::load(path)?)
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

impl AbilityListOracle for AbilityListRegistry {
    fn ability_list(&self, id: AbilityListId) -> Option<&[RawAbilityEntry]> {
        self.lists.get(&id).map(Vec::as_slice)
    }
}
