//! Collaborator trait implementations for [`ArenaWorld`].

use std::sync::Arc;

use creature_core::{
    CastTarget, CombatController, CreatureGroupNotifier, Detection, EffectKind,
    MovementController, ProspectiveCast, ReactionSignal, ReactionSink, SpatialOracle,
    SpellDefinition, SpellExecutor, SpellId, TargetMask, TargetScriptOracle, TargetType,
    ThreatOracle, UnitId, UnitKind, UnitSnapshot, WorldOracle,
};

use super::{ArenaEvent, ArenaWorld};

impl WorldOracle for ArenaWorld {
    fn unit(&self, id: UnitId) -> Option<UnitSnapshot> {
        self.snapshot(id)
    }

    fn has_aura(&self, unit: UnitId, spell: SpellId) -> bool {
        self.lock().auras.contains(&(unit, spell))
    }

    fn known_players(&self, observer: UnitId) -> Vec<UnitId> {
        self.lock()
            .units
            .values()
            .filter(|unit| unit.kind == UnitKind::Player && unit.id != observer)
            .map(|unit| unit.id)
            .collect()
    }

    fn is_hostile(&self, a: UnitId, b: UnitId) -> bool {
        let state = self.lock();
        match (state.factions.get(&a), state.factions.get(&b)) {
            (Some(fa), Some(fb)) => fa != fb,
            _ => false,
        }
    }
}

impl SpatialOracle for ArenaWorld {
    fn within_interaction_distance(&self, a: &UnitSnapshot, b: &UnitSnapshot) -> bool {
        a.distance_to(b) <= self.melee_range
    }

    fn can_reach(&self, _from: &UnitSnapshot, to: &UnitSnapshot) -> bool {
        !self.lock().unreachable.contains(&to.id)
    }

    fn line_of_sight(&self, _from: &UnitSnapshot, to: &UnitSnapshot) -> bool {
        !self.lock().blocked_sight.contains(&to.id)
    }

    fn detect(&self, _observer: &UnitSnapshot, target: &UnitSnapshot, distance: f32) -> Detection {
        match self.lock().stealth.get(&target.id) {
            None => Detection::VISIBLE,
            Some(stealth) if distance <= stealth.visible_within => Detection::VISIBLE,
            Some(stealth) if distance <= stealth.alert_within => Detection::SUSPICIOUS,
            Some(_) => Detection::HIDDEN,
        }
    }
}

impl ThreatOracle for ArenaWorld {
    fn hostile_target(&self, owner: UnitId) -> Option<UnitId> {
        self.lock()
            .threat
            .get(&owner)
            .and_then(|list| list.first().copied())
    }

    fn contender_count(&self, owner: UnitId) -> usize {
        self.lock().threat.get(&owner).map_or(0, Vec::len)
    }

    fn add_threat(&self, owner: UnitId, attacker: UnitId) {
        {
            let mut state = self.lock();
            let list = state.threat.entry(owner).or_default();
            if !list.contains(&attacker) {
                list.push(attacker);
            }
        }
        self.record(ArenaEvent::ThreatAdded { owner, attacker });
    }
}

impl MovementController for ArenaWorld {
    fn stop(&self, unit: UnitId) {
        self.modify(unit, |snapshot| snapshot.moving = false);
        self.record(ArenaEvent::MovementStopped(unit));
    }

    fn move_chase(&self, unit: UnitId) {
        self.modify(unit, |snapshot| snapshot.moving = true);
        self.record(ArenaEvent::ChaseStarted(unit));
    }

    fn face_target(&self, unit: UnitId, target: UnitId) {
        if let Some(target_position) = self.snapshot(target).map(|t| t.position) {
            self.modify(unit, |snapshot| {
                snapshot.position = snapshot.position.facing(&target_position);
            });
        }
        self.record(ArenaEvent::Faced { unit, target });
    }

    fn pause_out_of_combat(&self, unit: UnitId, duration_ms: u32) {
        self.record(ArenaEvent::MovementPaused { unit, duration_ms });
    }
}

impl CombatController for ArenaWorld {
    fn attack(&self, unit: UnitId, victim: UnitId) {
        self.modify(unit, |snapshot| {
            snapshot.combat_target = Some(victim);
            if !snapshot.phase.in_combat() {
                snapshot.phase = creature_core::CombatPhase::Engaging;
            }
        });
        self.record(ArenaEvent::Attack { unit, victim });
    }
}

impl CreatureGroupNotifier for ArenaWorld {
    fn member_attack_started(&self, member: UnitId, victim: UnitId) {
        self.record(ArenaEvent::GroupNotified { member, victim });
    }
}

impl ReactionSink for ArenaWorld {
    fn enqueue(&self, recipient: UnitId, signal: ReactionSignal) {
        self.record(ArenaEvent::Reaction {
            recipient,
            source: signal.source,
            reaction: signal.reaction,
        });
    }
}

impl TargetScriptOracle for ArenaWorld {
    fn resolve(
        &self,
        caster: &UnitSnapshot,
        target: TargetType,
        _param1: u32,
        _param2: u32,
        spell: &SpellDefinition,
    ) -> Option<UnitId> {
        let forced = self
            .lock()
            .script_overrides
            .get(&(caster.id, spell.id))
            .copied();
        match forced {
            Some(answer) => answer,
            None => self.pick_target(caster, target),
        }
    }
}

impl SpellExecutor for ArenaWorld {
    fn prepare_cast(
        &self,
        _caster: UnitId,
        spell: &Arc<SpellDefinition>,
        target: CastTarget,
        mask: TargetMask,
        _validate: bool,
    ) -> Option<ProspectiveCast> {
        let state = self.lock();
        if state.refused_spells.contains(&spell.id) {
            return None;
        }

        let mut cast = ProspectiveCast::new(Arc::clone(spell), target, mask);
        cast.target_immune = target
            .unit()
            .is_some_and(|unit| state.immune.contains(&unit));
        Some(cast)
    }

    fn start_cast(&self, caster: UnitId, cast: ProspectiveCast) {
        {
            let mut state = self.lock();
            if !cast.instant {
                state.casting.insert(caster, cast.spell_id());
            }
            if cast.spell.has_effect_of_type(&[EffectKind::PersistentAreaAura]) {
                state.active_spells.insert((caster, cast.spell_id()));
            }
            if cast.spell.has_effect_of_type(&[EffectKind::ApplyAura]) {
                if let Some(unit) = cast.target.unit() {
                    state.auras.insert((unit, cast.spell_id()));
                }
            }
        }
        self.record(ArenaEvent::CastStarted {
            caster,
            spell: cast.spell_id(),
            target: cast.target,
            instant: cast.instant,
        });
    }

    fn is_casting(&self, unit: UnitId) -> bool {
        self.lock().casting.contains_key(&unit)
    }

    fn is_casting_spell(&self, unit: UnitId, spell: SpellId) -> bool {
        self.lock().casting.get(&unit) == Some(&spell)
    }

    fn is_spell_active(&self, unit: UnitId, spell: SpellId) -> bool {
        self.lock().active_spells.contains(&(unit, spell))
    }

    fn remove_colliding_casts(&self, caster: UnitId, cast: &ProspectiveCast) {
        self.lock().casting.remove(&caster);
        self.record(ArenaEvent::CollidingCastsRemoved {
            caster,
            spell: cast.spell_id(),
        });
    }

    fn apply_passive_effects(&self, caster: UnitId, spell: &SpellDefinition) {
        self.lock().auras.insert((caster, spell.id));
        self.record(ArenaEvent::PassiveApplied {
            unit: caster,
            spell: spell.id,
        });
    }
}
