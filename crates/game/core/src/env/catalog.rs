//! Spell and ability-list oracles.

use std::sync::Arc;

use crate::ability::{AbilityListId, RawAbilityEntry};
use crate::spell::{SpellDefinition, SpellId};

/// Oracle providing spell definitions.
///
/// Populated once at startup and never mutated afterwards.
pub trait SpellOracle: Send + Sync {
    /// Returns the spell definition for `id`, if the catalog knows it.
    fn spell(&self, id: SpellId) -> Option<Arc<SpellDefinition>>;
}

/// Oracle providing raw, unresolved ability lists by list id.
pub trait AbilityListOracle: Send + Sync {
    fn ability_list(&self, id: AbilityListId) -> Option<&[RawAbilityEntry]>;
}
