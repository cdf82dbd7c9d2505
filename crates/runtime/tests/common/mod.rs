#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use creature_ai::{ArenaWorld, BehaviorScript, CreatureAi};
use creature_content::{AbilityListRegistry, AbilityListSpec, SpellRegistry};
use creature_core::{
    AbilityListId, AiConfig, CombatPhase, CreatureTemplate, EffectKind, Position,
    RawAbilityEntry, SpellDefinition, SpellEffect, SpellId, TargetMask, UnitId, UnitKind,
};
use rand::RngCore;

pub const CREATURE: UnitId = UnitId(1);
pub const PLAYER: UnitId = UnitId(100);
pub const LIST: AbilityListId = AbilityListId(1);

pub const CREATURE_FACTION: u32 = 1;
pub const PLAYER_FACTION: u32 = 2;

/// Harmful single-target spell.
pub fn bolt(id: u32) -> SpellDefinition {
    let mut spell = SpellDefinition::new(SpellId(id), format!("Bolt {id}"));
    spell.targets = TargetMask::UNIT | TargetMask::UNIT_ENEMY;
    spell.effects = vec![SpellEffect::harmful(EffectKind::SchoolDamage)];
    spell
}

/// Entry that always passes the chance gate.
pub fn certain(spell: u32) -> RawAbilityEntry {
    let mut entry = RawAbilityEntry::new(SpellId(spell));
    entry.chance = 100;
    entry
}

/// Creature at the origin in combat with a player `distance` away on +x.
pub fn arena_with_player(distance: f32) -> Arc<ArenaWorld> {
    let arena = Arc::new(ArenaWorld::new());
    arena.spawn_at(CREATURE, UnitKind::Creature, Position::ORIGIN, CREATURE_FACTION);
    arena.spawn_at(
        PLAYER,
        UnitKind::Player,
        Position::new(distance, 0.0, 0.0, std::f32::consts::PI),
        PLAYER_FACTION,
    );
    arena.modify(CREATURE, |unit| {
        unit.phase = CombatPhase::Combat;
        unit.combat_target = Some(PLAYER);
    });
    arena.set_threat(CREATURE, [PLAYER]);
    arena
}

pub struct Setup {
    pub arena: Arc<ArenaWorld>,
    pub spells: Vec<SpellDefinition>,
    pub entries: Vec<RawAbilityEntry>,
    pub template: CreatureTemplate,
    pub config: AiConfig,
}

impl Setup {
    pub fn new(arena: Arc<ArenaWorld>) -> Self {
        Self {
            arena,
            spells: Vec::new(),
            entries: Vec::new(),
            template: CreatureTemplate::new("Test Creature").with_ability_list(LIST),
            config: AiConfig::with_seed(7),
        }
    }

    pub fn spell(mut self, spell: SpellDefinition) -> Self {
        self.spells.push(spell);
        self
    }

    pub fn entry(mut self, entry: RawAbilityEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn template(mut self, change: impl FnOnce(&mut CreatureTemplate)) -> Self {
        change(&mut self.template);
        self
    }

    pub fn build(self) -> CreatureAi {
        self.build_with(|builder| builder)
    }

    pub fn build_with(
        self,
        customize: impl FnOnce(creature_ai::CreatureAiBuilder) -> creature_ai::CreatureAiBuilder,
    ) -> CreatureAi {
        let spells = SpellRegistry::from_definitions(self.spells).expect("unique spells");
        let lists = AbilityListRegistry::from_specs([AbilityListSpec {
            id: LIST,
            entries: self.entries,
        }])
        .expect("unique lists");

        let builder = CreatureAi::builder(CREATURE, self.template)
            .config(self.config)
            .host(self.arena)
            .spell_catalog(Arc::new(spells))
            .ability_lists(Arc::new(lists));

        customize(builder).build().expect("AI builds")
    }
}

/// Random source with a fixed output. `FixedRoll(0)` makes every percent
/// roll 0, so any configured chance passes.
pub struct FixedRoll(pub u32);

impl RngCore for FixedRoll {
    fn next_u32(&mut self) -> u32 {
        self.0
    }

    fn next_u64(&mut self) -> u64 {
        u64::from(self.0)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Behavior script that appends hook names to a shared log.
#[derive(Clone, Default)]
pub struct Recorder {
    pub log: Arc<Mutex<Vec<String>>>,
    pub arena: Option<Arc<ArenaWorld>>,
}

impl Recorder {
    pub fn watching(arena: Arc<ArenaWorld>) -> Self {
        Self {
            log: Arc::default(),
            arena: Some(arena),
        }
    }

    pub fn entries(&self) -> Vec<String> {
        self.log.lock().expect("log lock").clone()
    }

    fn push(&self, hook: &str) {
        let entry = match &self.arena {
            Some(arena) => format!("{hook}@{}", arena.events().len()),
            None => hook.to_string(),
        };
        self.log.lock().expect("log lock").push(entry);
    }
}

impl BehaviorScript for Recorder {
    fn on_spawn(&mut self, _unit: UnitId) {
        self.push("spawn");
    }

    fn on_idle(&mut self, _unit: UnitId) {
        self.push("idle");
    }

    fn on_death(&mut self, _unit: UnitId, _killer: Option<UnitId>) {
        self.push("death");
    }

    fn on_damage_taken(&mut self, _unit: UnitId, _attacker: UnitId, damage: u32) {
        self.push(&format!("damage:{damage}"));
    }

    fn on_enter_combat(&mut self, _unit: UnitId, _source: Option<UnitId>) {
        self.push("enter_combat");
    }

    fn on_emote_received(&mut self, _unit: UnitId, _player: UnitId, emote: u32) {
        self.push(&format!("emote:{emote}"));
    }

    fn on_scripted_event(&mut self, _unit: UnitId, event_id: u32, _data: u32) {
        self.push(&format!("event:{event_id}"));
    }
}
