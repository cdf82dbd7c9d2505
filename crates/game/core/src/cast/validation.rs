//! Cast validation chain.
//!
//! Checks run in a fixed order, cheapest and most specific first, and stop at
//! the first failure:
//!
//! 1. prepared cast and resolved target present
//! 2. target not fleeing
//! 3. target casting, when required
//! 4. spell not already active on the caster
//! 5. target lacks the aura, when required
//! 6. melee-range requirements
//! 7. unreachable-target requirement
//! 8. caster-side checks unless force-cast: fleeing, facing, immunity, charm
//! 9. interrupt-previous marker (never a failure)
//! 10. chance gate
//!
//! The chain reads world facts through [`CastFacts`] and never mutates
//! anything; the one side effect (interrupting a colliding cast) is reported
//! back in [`CastVerdict::interrupt_previous`] for the caller to perform.

use core::f32::consts::PI;

use super::{CastRejection, ProspectiveCast};
use crate::ability::CastFlags;
use crate::rng::AiRng;
use crate::spell::SpellId;
use crate::state::{Position, UnitId, UnitSnapshot};

/// Read-only world queries the chain needs.
pub trait CastFacts {
    fn is_casting(&self, unit: UnitId) -> bool;

    fn is_spell_active(&self, unit: UnitId, spell: SpellId) -> bool;

    fn has_aura(&self, unit: UnitId, spell: SpellId) -> bool;

    fn within_interaction_distance(&self, a: &UnitSnapshot, b: &UnitSnapshot) -> bool;

    fn can_reach(&self, from: &UnitSnapshot, to: &UnitSnapshot) -> bool;

    fn has_in_arc(&self, observer: &UnitSnapshot, point: &Position, arc: f32) -> bool;

    fn threat_contenders(&self, owner: UnitId) -> usize;
}

/// One prospective cast to validate.
#[derive(Clone, Copy, Debug)]
pub struct CastRequest<'a> {
    pub caster: &'a UnitSnapshot,
    pub target: Option<&'a UnitSnapshot>,
    pub cast: Option<&'a ProspectiveCast>,
    pub flags: CastFlags,
    pub chance: Option<u8>,
}

/// Accepted cast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CastApproval;

/// Outcome of the chain plus the interrupt side effect it requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CastVerdict {
    pub outcome: Result<CastApproval, CastRejection>,
    /// The chain reached the interrupt step with the flag set and the target
    /// casting. Holds even if the chance gate then failed.
    pub interrupt_previous: bool,
}

impl CastVerdict {
    #[inline]
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Runs the validation chain for `request`.
pub fn validate<F, R>(request: &CastRequest<'_>, facts: &F, rng: &mut R) -> CastVerdict
where
    F: CastFacts + ?Sized,
    R: AiRng + ?Sized,
{
    let mut interrupt_previous = false;
    let outcome = run_chain(request, facts, rng, &mut interrupt_previous);
    CastVerdict {
        outcome,
        interrupt_previous,
    }
}

fn run_chain<F, R>(
    request: &CastRequest<'_>,
    facts: &F,
    rng: &mut R,
    interrupt_previous: &mut bool,
) -> Result<CastApproval, CastRejection>
where
    F: CastFacts + ?Sized,
    R: AiRng + ?Sized,
{
    let caster = request.caster;
    let flags = request.flags;

    let cast = request.cast.ok_or(CastRejection::GenericError)?;
    let target = request.target.ok_or(CastRejection::TargetMissing)?;

    if target.is_fleeing() {
        return Err(CastRejection::FleeingTarget);
    }

    if flags.contains(CastFlags::TARGET_CASTING) && !facts.is_casting(target.id) {
        return Err(CastRejection::BadTarget);
    }

    // No re-stacking of persistent effects.
    if facts.is_spell_active(caster.id, cast.spell_id()) {
        return Err(CastRejection::AuraAlreadyActive);
    }

    if flags.contains(CastFlags::AURA_NOT_PRESENT) && facts.has_aura(target.id, cast.spell_id()) {
        return Err(CastRejection::AuraAlreadyActive);
    }

    let in_melee = || facts.within_interaction_distance(caster, target);

    if flags.contains(CastFlags::ONLY_IN_MELEE) && !in_melee() {
        return Err(CastRejection::OutOfRange);
    }

    if flags.contains(CastFlags::NOT_IN_MELEE) && in_melee() {
        return Err(CastRejection::TooClose);
    }

    if flags.contains(CastFlags::TARGET_UNREACHABLE)
        && (in_melee()
            || caster.moving
            || !caster.is_rooted()
            || facts.can_reach(caster, target))
    {
        return Err(CastRejection::Unreachable);
    }

    if !flags.contains(CastFlags::FORCE_CAST) {
        if caster.is_fleeing() {
            return Err(CastRejection::FleeingSelf);
        }

        let target_facing_caster = facts.has_in_arc(target, &caster.position, PI);
        let position = cast.spell.position;
        if !position.is_satisfied(target_facing_caster) {
            return Err(CastRejection::FacingViolation(position));
        }

        if cast.has_only_harmful_effects() && cast.target_immune {
            return Err(CastRejection::ImmuneTarget);
        }

        // Charming the only attacker empties the threat list and resets combat.
        if cast.has_charm_effect() && facts.threat_contenders(caster.id) == 1 {
            return Err(CastRejection::CharmRestricted);
        }
    }

    if flags.contains(CastFlags::INTERRUPT_PREVIOUS) && facts.is_casting(target.id) {
        *interrupt_previous = true;
    }

    if let Some(chance) = request.chance {
        if rng.roll_percent() >= chance {
            return Err(CastRejection::RetryChanceFailed);
        }
    }

    Ok(CastApproval)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::sync::Arc;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::cast::CastTarget;
    use crate::spell::{
        CastPosition, EffectKind, SpellDefinition, SpellEffect, SpellId, TargetMask,
    };
    use crate::state::{UnitFlags, UnitKind, UnitState};

    #[derive(Default)]
    struct Facts {
        target_casting: bool,
        spell_active: bool,
        target_has_aura: bool,
        in_melee: bool,
        reachable: bool,
        target_facing_caster: bool,
        contenders: usize,
        reach_probes: Cell<u32>,
    }

    impl CastFacts for Facts {
        fn is_casting(&self, _unit: UnitId) -> bool {
            self.target_casting
        }

        fn is_spell_active(&self, _unit: UnitId, _spell: SpellId) -> bool {
            self.spell_active
        }

        fn has_aura(&self, _unit: UnitId, _spell: SpellId) -> bool {
            self.target_has_aura
        }

        fn within_interaction_distance(&self, _a: &UnitSnapshot, _b: &UnitSnapshot) -> bool {
            self.in_melee
        }

        fn can_reach(&self, _from: &UnitSnapshot, _to: &UnitSnapshot) -> bool {
            self.reach_probes.set(self.reach_probes.get() + 1);
            self.reachable
        }

        fn has_in_arc(&self, _observer: &UnitSnapshot, _point: &Position, _arc: f32) -> bool {
            self.target_facing_caster
        }

        fn threat_contenders(&self, _owner: UnitId) -> usize {
            self.contenders
        }
    }

    fn caster() -> UnitSnapshot {
        UnitSnapshot::new(UnitId(1), UnitKind::Creature, Position::ORIGIN)
    }

    fn target() -> UnitSnapshot {
        UnitSnapshot::new(
            UnitId(2),
            UnitKind::Player,
            Position::new(3.0, 0.0, 0.0, 0.0),
        )
    }

    fn cast_of(spell: SpellDefinition) -> ProspectiveCast {
        ProspectiveCast::new(Arc::new(spell), CastTarget::Unit(UnitId(2)), TargetMask::UNIT)
    }

    fn bolt() -> ProspectiveCast {
        let mut spell = SpellDefinition::new(SpellId(100), "Bolt");
        spell.effects = vec![SpellEffect::harmful(EffectKind::SchoolDamage)];
        cast_of(spell)
    }

    fn check(
        caster: &UnitSnapshot,
        target: Option<&UnitSnapshot>,
        cast: Option<&ProspectiveCast>,
        flags: CastFlags,
        chance: Option<u8>,
        facts: &Facts,
    ) -> CastVerdict {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let request = CastRequest {
            caster,
            target,
            cast,
            flags,
            chance,
        };
        validate(&request, facts, &mut rng)
    }

    fn rejection(verdict: CastVerdict) -> CastRejection {
        verdict.outcome.expect_err("cast should be rejected")
    }

    #[test]
    fn plain_cast_succeeds() {
        let verdict = check(
            &caster(),
            Some(&target()),
            Some(&bolt()),
            CastFlags::empty(),
            None,
            &Facts::default(),
        );
        assert!(verdict.is_success());
        assert!(!verdict.interrupt_previous);
    }

    #[test]
    fn missing_cast_is_generic_error() {
        let verdict = check(
            &caster(),
            Some(&target()),
            None,
            CastFlags::empty(),
            None,
            &Facts::default(),
        );
        assert_eq!(rejection(verdict), CastRejection::GenericError);
    }

    #[test]
    fn missing_target() {
        let verdict = check(
            &caster(),
            None,
            Some(&bolt()),
            CastFlags::empty(),
            None,
            &Facts::default(),
        );
        assert_eq!(rejection(verdict), CastRejection::TargetMissing);
    }

    #[test]
    fn fleeing_target_by_flag_or_state() {
        let mut fleeing = target();
        fleeing.flags.insert(UnitFlags::FLEEING);
        let verdict = check(
            &caster(),
            Some(&fleeing),
            Some(&bolt()),
            CastFlags::empty(),
            None,
            &Facts::default(),
        );
        assert_eq!(rejection(verdict), CastRejection::FleeingTarget);

        let mut fleeing = target();
        fleeing.state.insert(UnitState::FLEEING);
        let verdict = check(
            &caster(),
            Some(&fleeing),
            Some(&bolt()),
            CastFlags::empty(),
            None,
            &Facts::default(),
        );
        assert_eq!(rejection(verdict), CastRejection::FleeingTarget);
    }

    #[test]
    fn requires_target_casting() {
        let verdict = check(
            &caster(),
            Some(&target()),
            Some(&bolt()),
            CastFlags::TARGET_CASTING,
            None,
            &Facts::default(),
        );
        assert_eq!(rejection(verdict), CastRejection::BadTarget);

        let facts = Facts {
            target_casting: true,
            ..Facts::default()
        };
        let verdict = check(
            &caster(),
            Some(&target()),
            Some(&bolt()),
            CastFlags::TARGET_CASTING,
            None,
            &facts,
        );
        assert!(verdict.is_success());
    }

    #[test]
    fn active_spell_is_not_restacked() {
        let facts = Facts {
            spell_active: true,
            ..Facts::default()
        };
        let verdict = check(
            &caster(),
            Some(&target()),
            Some(&bolt()),
            CastFlags::empty(),
            None,
            &facts,
        );
        assert_eq!(rejection(verdict), CastRejection::AuraAlreadyActive);
    }

    #[test]
    fn aura_not_present_requirement() {
        let facts = Facts {
            target_has_aura: true,
            ..Facts::default()
        };
        let verdict = check(
            &caster(),
            Some(&target()),
            Some(&bolt()),
            CastFlags::AURA_NOT_PRESENT,
            None,
            &facts,
        );
        assert_eq!(rejection(verdict), CastRejection::AuraAlreadyActive);

        // Without the flag the aura does not matter.
        let verdict = check(
            &caster(),
            Some(&target()),
            Some(&bolt()),
            CastFlags::empty(),
            None,
            &facts,
        );
        assert!(verdict.is_success());
    }

    #[test]
    fn melee_range_requirements() {
        let far = Facts::default();
        let near = Facts {
            in_melee: true,
            ..Facts::default()
        };

        let verdict = check(
            &caster(),
            Some(&target()),
            Some(&bolt()),
            CastFlags::ONLY_IN_MELEE,
            None,
            &far,
        );
        assert_eq!(rejection(verdict), CastRejection::OutOfRange);

        let verdict = check(
            &caster(),
            Some(&target()),
            Some(&bolt()),
            CastFlags::NOT_IN_MELEE,
            None,
            &near,
        );
        assert_eq!(rejection(verdict), CastRejection::TooClose);

        let verdict = check(
            &caster(),
            Some(&target()),
            Some(&bolt()),
            CastFlags::NOT_IN_MELEE,
            None,
            &far,
        );
        assert!(verdict.is_success());
    }

    #[test]
    fn unreachable_requires_all_conditions() {
        let mut rooted = caster();
        rooted.state.insert(UnitState::ROOTED);

        // Rooted, still, out of range, no path: allowed.
        let facts = Facts::default();
        let verdict = check(
            &rooted,
            Some(&target()),
            Some(&bolt()),
            CastFlags::TARGET_UNREACHABLE,
            None,
            &facts,
        );
        assert!(verdict.is_success());
        assert_eq!(facts.reach_probes.get(), 1);

        // Not rooted.
        let verdict = check(
            &caster(),
            Some(&target()),
            Some(&bolt()),
            CastFlags::TARGET_UNREACHABLE,
            None,
            &Facts::default(),
        );
        assert_eq!(rejection(verdict), CastRejection::Unreachable);

        // Moving.
        let mut moving = rooted;
        moving.moving = true;
        let verdict = check(
            &moving,
            Some(&target()),
            Some(&bolt()),
            CastFlags::TARGET_UNREACHABLE,
            None,
            &Facts::default(),
        );
        assert_eq!(rejection(verdict), CastRejection::Unreachable);

        // Path exists.
        let facts = Facts {
            reachable: true,
            ..Facts::default()
        };
        let verdict = check(
            &rooted,
            Some(&target()),
            Some(&bolt()),
            CastFlags::TARGET_UNREACHABLE,
            None,
            &facts,
        );
        assert_eq!(rejection(verdict), CastRejection::Unreachable);
    }

    #[test]
    fn unreachable_skips_path_probe_when_in_melee() {
        let mut rooted = caster();
        rooted.state.insert(UnitState::ROOTED);
        let facts = Facts {
            in_melee: true,
            ..Facts::default()
        };
        let verdict = check(
            &rooted,
            Some(&target()),
            Some(&bolt()),
            CastFlags::TARGET_UNREACHABLE,
            None,
            &facts,
        );
        assert_eq!(rejection(verdict), CastRejection::Unreachable);
        assert_eq!(facts.reach_probes.get(), 0);
    }

    #[test]
    fn fleeing_caster_unless_forced() {
        let mut fleeing = caster();
        fleeing.state.insert(UnitState::FLEEING);

        let verdict = check(
            &fleeing,
            Some(&target()),
            Some(&bolt()),
            CastFlags::empty(),
            None,
            &Facts::default(),
        );
        assert_eq!(rejection(verdict), CastRejection::FleeingSelf);

        let verdict = check(
            &fleeing,
            Some(&target()),
            Some(&bolt()),
            CastFlags::FORCE_CAST,
            None,
            &Facts::default(),
        );
        assert!(verdict.is_success());
    }

    #[test]
    fn facing_requirements_distinguish_behind() {
        let mut backstab = SpellDefinition::new(SpellId(200), "Backstab");
        backstab.position = CastPosition::Behind;
        let backstab = cast_of(backstab);

        let facing = Facts {
            target_facing_caster: true,
            ..Facts::default()
        };
        let verdict = check(
            &caster(),
            Some(&target()),
            Some(&backstab),
            CastFlags::empty(),
            None,
            &facing,
        );
        assert_eq!(
            rejection(verdict),
            CastRejection::FacingViolation(CastPosition::Behind)
        );

        let mut cone = SpellDefinition::new(SpellId(201), "Cone");
        cone.position = CastPosition::InFront;
        let cone = cast_of(cone);
        let verdict = check(
            &caster(),
            Some(&target()),
            Some(&cone),
            CastFlags::empty(),
            None,
            &Facts::default(),
        );
        let rejected = rejection(verdict);
        assert_eq!(rejected, CastRejection::FacingViolation(CastPosition::InFront));
        assert_eq!(
            crate::error::AiError::error_code(&rejected),
            "CAST_NOT_IN_FRONT"
        );
    }

    #[test]
    fn immune_target_only_for_purely_harmful() {
        let mut immune = bolt();
        immune.target_immune = true;
        let verdict = check(
            &caster(),
            Some(&target()),
            Some(&immune),
            CastFlags::empty(),
            None,
            &Facts::default(),
        );
        assert_eq!(rejection(verdict), CastRejection::ImmuneTarget);

        let mut mixed = SpellDefinition::new(SpellId(300), "Drain");
        mixed.effects = vec![
            SpellEffect::harmful(EffectKind::SchoolDamage),
            SpellEffect::beneficial(EffectKind::Heal),
        ];
        let mut mixed = cast_of(mixed);
        mixed.target_immune = true;
        let verdict = check(
            &caster(),
            Some(&target()),
            Some(&mixed),
            CastFlags::empty(),
            None,
            &Facts::default(),
        );
        assert!(verdict.is_success());
    }

    #[test]
    fn charm_with_single_contender_is_restricted() {
        let mut charm = SpellDefinition::new(SpellId(400), "Mind Control");
        charm.effects = vec![SpellEffect::harmful(EffectKind::Charm)];
        let charm = cast_of(charm);

        let facts = Facts {
            contenders: 1,
            ..Facts::default()
        };
        let verdict = check(
            &caster(),
            Some(&target()),
            Some(&charm),
            CastFlags::empty(),
            Some(100),
            &facts,
        );
        assert_eq!(rejection(verdict), CastRejection::CharmRestricted);

        let facts = Facts {
            contenders: 2,
            ..Facts::default()
        };
        let verdict = check(
            &caster(),
            Some(&target()),
            Some(&charm),
            CastFlags::empty(),
            None,
            &facts,
        );
        assert!(verdict.is_success());
    }

    #[test]
    fn interrupt_marker_set_only_when_target_casting() {
        let casting = Facts {
            target_casting: true,
            ..Facts::default()
        };
        let verdict = check(
            &caster(),
            Some(&target()),
            Some(&bolt()),
            CastFlags::INTERRUPT_PREVIOUS,
            None,
            &casting,
        );
        assert!(verdict.is_success());
        assert!(verdict.interrupt_previous);

        let verdict = check(
            &caster(),
            Some(&target()),
            Some(&bolt()),
            CastFlags::INTERRUPT_PREVIOUS,
            None,
            &Facts::default(),
        );
        assert!(!verdict.interrupt_previous);
    }

    #[test]
    fn interrupt_marker_survives_failed_roll() {
        let casting = Facts {
            target_casting: true,
            ..Facts::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let caster = caster();
        let target = target();
        let cast = bolt();
        let request = CastRequest {
            caster: &caster,
            target: Some(&target),
            cast: Some(&cast),
            flags: CastFlags::INTERRUPT_PREVIOUS,
            // A 1% chance fails for nearly every roll.
            chance: Some(1),
        };

        let verdict = (0..20)
            .map(|_| validate(&request, &casting, &mut rng))
            .find(|verdict| !verdict.is_success())
            .expect("a 1% gate fails within 20 rolls");
        assert_eq!(verdict.outcome, Err(CastRejection::RetryChanceFailed));
        assert!(verdict.interrupt_previous);
    }

    #[test]
    fn full_chance_always_passes() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let caster = caster();
        let target = target();
        let cast = bolt();
        let request = CastRequest {
            caster: &caster,
            target: Some(&target),
            cast: Some(&cast),
            flags: CastFlags::empty(),
            chance: Some(100),
        };
        for _ in 0..1000 {
            assert!(validate(&request, &Facts::default(), &mut rng).is_success());
        }
    }

    #[test]
    fn half_chance_converges() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let caster = caster();
        let target = target();
        let cast = bolt();
        let request = CastRequest {
            caster: &caster,
            target: Some(&target),
            cast: Some(&cast),
            flags: CastFlags::empty(),
            chance: Some(50),
        };

        let trials = 10_000;
        let passed = (0..trials)
            .filter(|_| validate(&request, &Facts::default(), &mut rng).is_success())
            .count();
        let fraction = passed as f64 / trials as f64;
        assert!((fraction - 0.5).abs() < 0.03, "fraction was {fraction}");
    }

    #[test]
    fn order_target_fleeing_before_melee() {
        // Both fleeing and too close: the earlier check wins.
        let mut fleeing = target();
        fleeing.state.insert(UnitState::FLEEING);
        let facts = Facts {
            in_melee: true,
            ..Facts::default()
        };
        let verdict = check(
            &caster(),
            Some(&fleeing),
            Some(&bolt()),
            CastFlags::NOT_IN_MELEE,
            None,
            &facts,
        );
        assert_eq!(rejection(verdict), CastRejection::FleeingTarget);
    }
}
