//! Scripted target lookup.

use crate::ability::TargetType;
use crate::spell::SpellDefinition;
use crate::state::{UnitId, UnitSnapshot};

/// Interprets an ability's target specifier.
///
/// Returning `None` is a normal outcome (nobody matches right now), not an
/// error.
pub trait TargetScriptOracle: Send + Sync {
    fn resolve(
        &self,
        caster: &UnitSnapshot,
        target: TargetType,
        param1: u32,
        param2: u32,
        spell: &SpellDefinition,
    ) -> Option<UnitId>;
}
