//! Creature template loader.

use std::path::Path;

use creature_core::CreatureTemplate;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// A creature template plus where to place it relative to the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatureSpawn {
    pub template: CreatureTemplate,
    /// Distance from the player at spawn.
    #[serde(default = "CreatureSpawn::default_distance")]
    pub distance: f32,
}

impl CreatureSpawn {
    fn default_distance() -> f32 {
        10.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CreatureFile {
    creatures: Vec<CreatureSpawn>,
}

/// Loader for creature placements from RON files.
pub struct CreatureLoader;

impl CreatureLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<CreatureSpawn>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<CreatureSpawn>> {
        let file: CreatureFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse creature RON: {}", e))?;

        for spawn in &file.creatures {
            let range = spawn.template.detection_range;
            if range.is_nan() || range < 0.0 {
                anyhow::bail!(
                    "Creature '{}' has invalid detection range {}",
                    spawn.template.name,
                    range
                );
            }
        }

        Ok(file.creatures)
    }
}
