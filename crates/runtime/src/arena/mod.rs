//! In-memory host world.
//!
//! [`ArenaWorld`] implements every collaborator trait the engine consumes on
//! top of one mutex-guarded state, and records each command it receives as an
//! [`ArenaEvent`]. Integration tests and the simulation harness drive
//! creatures against it; it is not meant to model a full game world.
mod host;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use creature_core::{
    AiReaction, CastTarget, CombatPhase, Position, SpellId, TargetType, UnitId, UnitKind,
    UnitSnapshot,
};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

/// Command or signal the arena received from an AI instance.
#[derive(Clone, Debug, PartialEq)]
pub enum ArenaEvent {
    CastStarted {
        caster: UnitId,
        spell: SpellId,
        target: CastTarget,
        instant: bool,
    },
    PassiveApplied {
        unit: UnitId,
        spell: SpellId,
    },
    CollidingCastsRemoved {
        caster: UnitId,
        spell: SpellId,
    },
    MovementStopped(UnitId),
    ChaseStarted(UnitId),
    Faced {
        unit: UnitId,
        target: UnitId,
    },
    MovementPaused {
        unit: UnitId,
        duration_ms: u32,
    },
    Attack {
        unit: UnitId,
        victim: UnitId,
    },
    Reaction {
        recipient: UnitId,
        source: UnitId,
        reaction: AiReaction,
    },
    GroupNotified {
        member: UnitId,
        victim: UnitId,
    },
    ThreatAdded {
        owner: UnitId,
        attacker: UnitId,
    },
}

/// Stealth profile of a unit: seen inside `visible_within`, suspicious
/// inside `alert_within`, hidden beyond.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stealth {
    pub visible_within: f32,
    pub alert_within: f32,
}

#[derive(Debug)]
struct ArenaState {
    units: BTreeMap<UnitId, UnitSnapshot>,
    factions: HashMap<UnitId, u32>,
    /// Ordered threat lists; the first entry is the top-threat target.
    threat: HashMap<UnitId, Vec<UnitId>>,
    auras: HashSet<(UnitId, SpellId)>,
    active_spells: HashSet<(UnitId, SpellId)>,
    casting: HashMap<UnitId, SpellId>,
    immune: HashSet<UnitId>,
    unreachable: HashSet<UnitId>,
    blocked_sight: HashSet<UnitId>,
    stealth: HashMap<UnitId, Stealth>,
    refused_spells: HashSet<SpellId>,
    /// Script answers that replace the built-in specifier interpretation.
    script_overrides: HashMap<(UnitId, SpellId), Option<UnitId>>,
    events: Vec<ArenaEvent>,
    /// Source for the random threat specifiers.
    rng: ChaCha8Rng,
}

/// Shared in-memory world.
#[derive(Debug)]
pub struct ArenaWorld {
    state: Mutex<ArenaState>,
    melee_range: f32,
}

impl Default for ArenaWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl ArenaWorld {
    pub const DEFAULT_MELEE_RANGE: f32 = 5.0;
    pub const DEFAULT_SEED: u64 = 0;

    pub fn new() -> Self {
        Self::with_melee_range(Self::DEFAULT_MELEE_RANGE)
    }

    pub fn with_melee_range(melee_range: f32) -> Self {
        Self {
            state: Mutex::new(ArenaState {
                units: BTreeMap::new(),
                factions: HashMap::new(),
                threat: HashMap::new(),
                auras: HashSet::new(),
                active_spells: HashSet::new(),
                casting: HashMap::new(),
                immune: HashSet::new(),
                unreachable: HashSet::new(),
                blocked_sight: HashSet::new(),
                stealth: HashMap::new(),
                refused_spells: HashSet::new(),
                script_overrides: HashMap::new(),
                events: Vec::new(),
                rng: ChaCha8Rng::seed_from_u64(Self::DEFAULT_SEED),
            }),
            melee_range,
        }
    }

    /// Reseeds the stream behind `HostileRandom` and `HostileRandomNotTop`.
    pub fn seeded(self, seed: u64) -> Self {
        self.lock().rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    fn lock(&self) -> MutexGuard<'_, ArenaState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ===== population =====

    /// Adds a unit in `faction`. Units in different factions are hostile.
    pub fn spawn(&self, unit: UnitSnapshot, faction: u32) {
        let mut state = self.lock();
        state.factions.insert(unit.id, faction);
        state.units.insert(unit.id, unit);
    }

    /// Convenience: a unit of `kind` at `position`.
    pub fn spawn_at(&self, id: UnitId, kind: UnitKind, position: Position, faction: u32) {
        self.spawn(UnitSnapshot::new(id, kind, position), faction);
    }

    pub fn despawn(&self, id: UnitId) {
        let mut state = self.lock();
        state.units.remove(&id);
        state.factions.remove(&id);
        state.threat.remove(&id);
        state.casting.remove(&id);
    }

    /// Applies `change` to a unit. Returns false if the unit is unknown.
    pub fn modify(&self, id: UnitId, change: impl FnOnce(&mut UnitSnapshot)) -> bool {
        match self.lock().units.get_mut(&id) {
            Some(unit) => {
                change(unit);
                true
            }
            None => false,
        }
    }

    pub fn set_phase(&self, id: UnitId, phase: CombatPhase) -> bool {
        self.modify(id, |unit| unit.phase = phase)
    }

    pub fn kill(&self, id: UnitId) -> bool {
        self.modify(id, |unit| {
            unit.alive = false;
            unit.phase = CombatPhase::Idle;
            unit.combat_target = None;
        })
    }

    /// Replaces `owner`'s threat list; the first entry becomes the top target.
    pub fn set_threat(&self, owner: UnitId, contenders: impl IntoIterator<Item = UnitId>) {
        self.lock().threat.insert(owner, contenders.into_iter().collect());
    }

    pub fn set_casting(&self, unit: UnitId, spell: Option<SpellId>) {
        let mut state = self.lock();
        match spell {
            Some(spell) => state.casting.insert(unit, spell),
            None => state.casting.remove(&unit),
        };
    }

    /// Completes every in-flight cast.
    pub fn finish_casts(&self) {
        self.lock().casting.clear();
    }

    pub fn add_aura(&self, unit: UnitId, spell: SpellId) {
        self.lock().auras.insert((unit, spell));
    }

    pub fn set_immune(&self, unit: UnitId, immune: bool) {
        toggle(&mut self.lock().immune, unit, immune);
    }

    pub fn set_unreachable(&self, unit: UnitId, unreachable: bool) {
        toggle(&mut self.lock().unreachable, unit, unreachable);
    }

    pub fn set_blocked_sight(&self, unit: UnitId, blocked: bool) {
        toggle(&mut self.lock().blocked_sight, unit, blocked);
    }

    pub fn set_stealth(&self, unit: UnitId, stealth: Option<Stealth>) {
        let mut state = self.lock();
        match stealth {
            Some(stealth) => state.stealth.insert(unit, stealth),
            None => state.stealth.remove(&unit),
        };
    }

    /// Makes the engine refuse to prepare `spell`.
    pub fn refuse_spell(&self, spell: SpellId) {
        self.lock().refused_spells.insert(spell);
    }

    /// Forces the target script's answer for `caster` casting `spell`.
    pub fn override_script_target(&self, caster: UnitId, spell: SpellId, target: Option<UnitId>) {
        self.lock().script_overrides.insert((caster, spell), target);
    }

    // ===== inspection =====

    pub fn snapshot(&self, id: UnitId) -> Option<UnitSnapshot> {
        self.lock().units.get(&id).copied()
    }

    pub fn unit_ids(&self) -> Vec<UnitId> {
        self.lock().units.keys().copied().collect()
    }

    pub fn events(&self) -> Vec<ArenaEvent> {
        self.lock().events.clone()
    }

    /// Drains the event log.
    pub fn take_events(&self) -> Vec<ArenaEvent> {
        std::mem::take(&mut self.lock().events)
    }

    /// Spells cast by `caster`, in order.
    pub fn casts_by(&self, caster: UnitId) -> Vec<SpellId> {
        self.lock()
            .events
            .iter()
            .filter_map(|event| match event {
                ArenaEvent::CastStarted {
                    caster: who, spell, ..
                } if *who == caster => Some(*spell),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: ArenaEvent) {
        self.lock().events.push(event);
    }

    /// Built-in interpretation of target specifiers.
    fn pick_target(&self, caster: &UnitSnapshot, target: TargetType) -> Option<UnitId> {
        let mut guard = self.lock();
        let state = &mut *guard;
        let threat = state.threat.get(&caster.id).map(Vec::as_slice).unwrap_or(&[]);
        match target {
            TargetType::Provided => caster.combat_target,
            TargetType::Hostile => threat.first().copied(),
            TargetType::HostileRandom => threat.choose(&mut state.rng).copied(),
            TargetType::HostileSecondAggro => threat.get(1).copied(),
            TargetType::HostileRandomNotTop => threat
                .get(1..)
                .and_then(|rest| rest.choose(&mut state.rng))
                .copied(),
            TargetType::HostileLastAggro => threat.last().copied(),
            TargetType::SelfTarget
            | TargetType::OwnerOrSelf
            | TargetType::FriendlyInjured
            | TargetType::FriendlyMissingBuff
            | TargetType::FriendlyCrowdControlled => Some(caster.id),
            TargetType::Owner => None,
        }
    }
}

fn toggle(set: &mut HashSet<UnitId>, unit: UnitId, on: bool) {
    if on {
        set.insert(unit);
    } else {
        set.remove(&unit);
    }
}
