//! Prospective casts, their validation, and cooldown bookkeeping.
mod cooldown;
mod error;
mod validation;

use std::sync::Arc;

use crate::spell::{SpellDefinition, SpellId, TargetMask};
use crate::state::{Position, UnitId};

pub use cooldown::CooldownTracker;
pub use error::CastRejection;
pub use validation::{CastApproval, CastFacts, CastRequest, CastVerdict, validate};

/// Where a cast is aimed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CastTarget {
    Unit(UnitId),
    /// Ground-targeted spells aim at a copied location, not the unit.
    Location(Position),
}

impl CastTarget {
    pub fn unit(&self) -> Option<UnitId> {
        match self {
            Self::Unit(id) => Some(*id),
            Self::Location(_) => None,
        }
    }
}

/// A cast prepared by the spell engine but not yet committed.
#[derive(Clone, Debug, PartialEq)]
pub struct ProspectiveCast {
    pub spell: Arc<SpellDefinition>,
    pub target: CastTarget,
    pub mask: TargetMask,
    /// The engine determined the target ignores every effect of this spell.
    pub target_immune: bool,
    /// Skip the cast time when committed.
    pub instant: bool,
}

impl ProspectiveCast {
    pub fn new(spell: Arc<SpellDefinition>, target: CastTarget, mask: TargetMask) -> Self {
        Self {
            spell,
            target,
            mask,
            target_immune: false,
            instant: false,
        }
    }

    #[inline]
    pub fn spell_id(&self) -> SpellId {
        self.spell.id
    }

    /// Triggered abilities execute without a cast time.
    pub fn force_instant(&mut self) {
        self.instant = true;
    }

    #[inline]
    pub fn has_only_harmful_effects(&self) -> bool {
        self.spell.has_only_harmful_effects()
    }

    #[inline]
    pub fn has_charm_effect(&self) -> bool {
        self.spell.has_charm_effect()
    }
}
