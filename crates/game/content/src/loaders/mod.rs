//! Content loaders for reading creature data from files.
//!
//! Each loader converts one RON/TOML file into core types; the registries
//! wrap the results in the oracle traits the engine consumes.

pub mod abilities;
pub mod config;
pub mod creatures;
pub mod factory;
pub mod spells;

pub use abilities::{AbilityListLoader, AbilityListRegistry, AbilityListSpec};
pub use config::ConfigLoader;
pub use creatures::{CreatureLoader, CreatureSpawn};
pub use factory::ContentFactory;
pub use spells::{SpellLoader, SpellRegistry};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
