//! Data-driven content definitions and loaders.
//!
//! This crate turns RON/TOML data files into the in-memory registries the
//! creature AI consumes:
//! - Spell catalogs (data-driven via RON)
//! - Ability lists (data-driven via RON)
//! - Creature templates and placements (data-driven via RON)
//! - AI configuration (data-driven via TOML)
//!
//! Registries are populated once and never mutated afterwards; the engine
//! reads them through `creature_core::SpellOracle` and
//! `creature_core::AbilityListOracle`.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    AbilityListLoader, AbilityListRegistry, AbilityListSpec, ConfigLoader, ContentFactory,
    CreatureLoader, CreatureSpawn, LoadResult, SpellLoader, SpellRegistry,
};
