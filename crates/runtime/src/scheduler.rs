//! Cast scheduler: cadence timer and the evaluation pass.
//!
//! The timer counts down by elapsed time. When it reaches zero a pass walks
//! the ability list in declared order and the timer is reset to the cadence,
//! however the pass went.
//!
//! Within a pass at most one ordinary ability may commit. Triggered and
//! interrupt-capable entries are exempt from that check and may still fire
//! after the slot is taken.

use creature_core::{
    AbilityEntry, AbilityList, AiError, AiRng, CastRejection, CastRequest, CooldownTracker,
    SpellId, UnitSnapshot, validate,
};
use rand::RngCore;
use tracing::{debug, trace};

use crate::resolver::TargetResolver;
use crate::services::AiServices;

/// Two-state cadence timer (waiting / due).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CastScheduler {
    cadence_ms: u32,
    remaining_ms: u32,
}

impl CastScheduler {
    /// A new scheduler is due on its first tick.
    pub fn new(cadence_ms: u32) -> Self {
        Self {
            cadence_ms,
            remaining_ms: 0,
        }
    }

    pub fn cadence_ms(&self) -> u32 {
        self.cadence_ms
    }

    pub fn remaining_ms(&self) -> u32 {
        self.remaining_ms
    }

    /// Advances the timer; returns true when a pass is due.
    ///
    /// A due timer is immediately reset to the cadence.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        if self.remaining_ms > 0 {
            return false;
        }
        self.remaining_ms = self.cadence_ms;
        true
    }

    /// Makes the next tick run a pass.
    pub fn make_due(&mut self) {
        self.remaining_ms = 0;
    }
}

/// What one evaluation pass did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Committed casts, in commit order.
    pub committed: Vec<SpellId>,
    /// Abilities whose chance gate failed and got a fresh cooldown.
    pub retried: Vec<SpellId>,
    pub rejected: Vec<(SpellId, CastRejection)>,
}

impl PassReport {
    pub fn is_idle(&self) -> bool {
        self.committed.is_empty() && self.retried.is_empty() && self.rejected.is_empty()
    }
}

/// Mutable state one pass works on.
pub(crate) struct PassContext<'a> {
    pub caster: &'a UnitSnapshot,
    pub abilities: &'a AbilityList,
    pub cooldowns: &'a mut CooldownTracker,
    pub services: &'a AiServices,
    pub rng: &'a mut dyn RngCore,
}

pub(crate) fn run_pass(ctx: PassContext<'_>) -> PassReport {
    let PassContext {
        caster,
        abilities,
        cooldowns,
        services,
        rng,
    } = ctx;

    let mut report = PassReport::default();
    let mut exclusive_used = false;

    for entry in abilities.iter() {
        let spell_id = entry.spell_id();

        if cooldowns.is_on_cooldown(spell_id)
            || services.spells.is_casting_spell(caster.id, spell_id)
        {
            continue;
        }

        if !entry.is_exclusivity_exempt()
            && (exclusive_used || services.spells.is_casting(caster.id))
        {
            continue;
        }

        let Some(resolved) = TargetResolver::resolve(caster, entry, services) else {
            trace!(
                target: "creature_ai::scheduler",
                unit = %caster.id,
                spell = %spell_id,
                "no target resolved"
            );
            continue;
        };

        let mut prepared = services.spells.prepare_cast(
            caster.id,
            &entry.spell,
            resolved.cast_target,
            resolved.mask,
            true,
        );

        let request = CastRequest {
            caster,
            target: Some(&resolved.unit),
            cast: prepared.as_ref(),
            flags: entry.flags,
            chance: entry.chance,
        };
        let verdict = validate(&request, &services.cast_facts(), &mut *rng);

        if verdict.interrupt_previous {
            if let Some(cast) = prepared.as_ref() {
                services.spells.remove_colliding_casts(caster.id, cast);
            }
        }

        match verdict.outcome {
            Ok(_) => {
                let Some(mut cast) = prepared.take() else {
                    continue;
                };
                if entry.is_triggered() {
                    cast.force_instant();
                } else {
                    exclusive_used = true;
                }

                if entry.halts_movement() {
                    services.movement.stop(caster.id);
                }

                debug!(
                    target: "creature_ai::scheduler",
                    unit = %caster.id,
                    spell = %spell_id,
                    victim = %resolved.unit.id,
                    instant = cast.instant,
                    "committing cast"
                );
                services.spells.start_cast(caster.id, cast);
                cooldowns.set(spell_id, entry.spell.recovery_ms);
                report.committed.push(spell_id);
            }
            Err(rejection) if rejection.is_retry() => {
                let delay = retry_cooldown(entry, &mut *rng);
                trace!(
                    target: "creature_ai::scheduler",
                    unit = %caster.id,
                    spell = %spell_id,
                    delay_ms = delay,
                    "chance roll failed, re-arming cooldown"
                );
                cooldowns.set(spell_id, delay);
                report.retried.push(spell_id);
            }
            Err(rejection) => {
                trace!(
                    target: "creature_ai::scheduler",
                    unit = %caster.id,
                    spell = %spell_id,
                    code = rejection.error_code(),
                    severity = rejection.severity().as_str(),
                    "cast rejected"
                );
                report.rejected.push((spell_id, rejection));
            }
        }
    }

    trace!(
        target: "creature_ai::scheduler",
        unit = %caster.id,
        committed = report.committed.len(),
        retried = report.retried.len(),
        rejected = report.rejected.len(),
        "evaluation pass complete"
    );

    report
}

/// The spell's own recovery time, or a fresh initial delay when it has none.
fn retry_cooldown(entry: &AbilityEntry, rng: &mut dyn RngCore) -> u32 {
    match entry.spell.recovery_ms {
        0 => initial_cooldown(entry, rng),
        recovery => recovery,
    }
}

/// Random initial delay within the entry's configured bounds.
pub(crate) fn initial_cooldown(entry: &AbilityEntry, rng: &mut dyn RngCore) -> u32 {
    let (min, max) = entry.delay_init;
    rng.delay_ms(min, max)
}
