//! Spell execution engine interface.

use std::sync::Arc;

use crate::cast::{CastTarget, ProspectiveCast};
use crate::spell::{SpellDefinition, SpellId, TargetMask};
use crate::state::UnitId;

/// The spell-effect engine as seen by the AI.
///
/// The AI prepares a cast, validates it itself, then commits it. Damage,
/// auras and interruption of in-flight casts all happen on the other side of
/// this trait.
pub trait SpellExecutor: Send + Sync {
    /// Builds a prospective cast, or `None` if the engine refuses it outright.
    ///
    /// When `validate` is false the engine skips its own target checks.
    fn prepare_cast(
        &self,
        caster: UnitId,
        spell: &Arc<SpellDefinition>,
        target: CastTarget,
        mask: TargetMask,
        validate: bool,
    ) -> Option<ProspectiveCast>;

    /// Commits a cast prepared by [`SpellExecutor::prepare_cast`].
    fn start_cast(&self, caster: UnitId, cast: ProspectiveCast);

    /// Any cast in progress.
    fn is_casting(&self, unit: UnitId) -> bool;

    /// A cast of `spell` in progress.
    fn is_casting_spell(&self, unit: UnitId, spell: SpellId) -> bool;

    /// `spell` is active on `unit` as a persistent effect (area aura, channel).
    fn is_spell_active(&self, unit: UnitId, spell: SpellId) -> bool;

    /// Cancels the caster's in-flight casts that collide with `cast`.
    fn remove_colliding_casts(&self, caster: UnitId, cast: &ProspectiveCast);

    /// Applies a passive spell's effects permanently.
    fn apply_passive_effects(&self, caster: UnitId, spell: &SpellDefinition);
}
