//! Target resolution for ability entries.
//!
//! Interpreting the target specifier belongs to the script service. This
//! stage only turns its answer into something the spell engine can prepare:
//! a unit snapshot for validation, the cast target (unit or copied location),
//! and the corrected target mask.

use creature_core::{AbilityEntry, CastTarget, TargetMask, UnitSnapshot};

use crate::services::AiServices;

/// A concrete target for one ability entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedTarget {
    /// Unit the script picked; validation runs against it.
    pub unit: UnitSnapshot,
    /// What the cast is aimed at.
    pub cast_target: CastTarget,
    pub mask: TargetMask,
}

pub struct TargetResolver;

impl TargetResolver {
    /// Returns `None` when nobody matches the specifier right now.
    pub fn resolve(
        caster: &UnitSnapshot,
        entry: &AbilityEntry,
        services: &AiServices,
    ) -> Option<ResolvedTarget> {
        let target_id = services.script.resolve(
            caster,
            entry.target,
            entry.target_param1,
            entry.target_param2,
            &entry.spell,
        )?;

        let unit = if target_id == caster.id {
            *caster
        } else {
            services.world.unit(target_id)?
        };

        Some(Self::shape(caster, unit, entry.spell.targets))
    }

    /// Location substitution and mask correction.
    pub fn shape(caster: &UnitSnapshot, unit: UnitSnapshot, mask: TargetMask) -> ResolvedTarget {
        if mask.can_target_terrain() {
            return ResolvedTarget {
                unit,
                cast_target: CastTarget::Location(unit.position),
                mask,
            };
        }

        // A self-only spell aimed at someone else needs a unit mask to reach them.
        let mask = if mask.is_self_only() && unit.id != caster.id {
            TargetMask::UNIT
        } else {
            mask
        };

        ResolvedTarget {
            unit,
            cast_target: CastTarget::Unit(unit.id),
            mask,
        }
    }
}
