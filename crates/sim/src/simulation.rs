//! Arena setup and the tick loop.

use std::collections::BTreeMap;
use std::f32::consts::TAU;
use std::fmt;
use std::sync::Arc;

use anyhow::{Context, Result};
use creature_ai::{ArenaWorld, CreatureAi, PassReport};
use creature_content::{ContentFactory, SpellRegistry};
use creature_core::{CombatPhase, Position, SpellId, SpellOracle, UnitId, UnitKind};
use tracing::{debug, info};

pub const PLAYER: UnitId = UnitId(1);
const FIRST_CREATURE: u64 = 100;

const PLAYER_FACTION: u32 = 1;
const CREATURE_FACTION: u32 = 2;

/// The player channels a spell for the first half of every cycle, giving
/// interrupt abilities something to react to.
const PLAYER_CAST_CYCLE_MS: u64 = 4_000;
const PLAYER_SPELL: SpellId = SpellId(0);

pub struct Simulation {
    arena: Arc<ArenaWorld>,
    spells: Arc<SpellRegistry>,
    creatures: Vec<Tracked>,
    elapsed_ms: u64,
    /// Arena events drained so far.
    drained_events: usize,
}

struct Tracked {
    ai: CreatureAi,
    summary: CreatureSummary,
}

impl Simulation {
    /// Spawns the player at the origin and every configured creature on a
    /// circle around it, already in combat with the player.
    pub fn load(factory: &ContentFactory, seed: Option<u64>) -> Result<Self> {
        let mut config = factory.load_config().context("loading AI config")?;
        if seed.is_some() {
            config.rng_seed = seed;
        }
        let spells = Arc::new(factory.load_spells().context("loading spells")?);
        let lists = Arc::new(
            factory
                .load_ability_lists()
                .context("loading ability lists")?,
        );
        let spawns = factory.load_creatures().context("loading creatures")?;

        let arena = Arc::new(match config.rng_seed {
            Some(seed) => ArenaWorld::new().seeded(seed),
            None => ArenaWorld::new(),
        });
        arena.spawn_at(PLAYER, UnitKind::Player, Position::ORIGIN, PLAYER_FACTION);

        let count = spawns.len().max(1) as f32;
        let mut creatures = Vec::with_capacity(spawns.len());
        for (index, spawn) in spawns.into_iter().enumerate() {
            let unit = UnitId(FIRST_CREATURE + index as u64);
            let angle = TAU * index as f32 / count;
            let position = Position::new(
                spawn.distance * angle.cos(),
                spawn.distance * angle.sin(),
                0.0,
                0.0,
            )
            .facing(&Position::ORIGIN);

            arena.spawn_at(unit, UnitKind::Creature, position, CREATURE_FACTION);
            arena.set_phase(unit, CombatPhase::Combat);
            arena.set_threat(unit, [PLAYER]);

            // Distinct but reproducible streams per creature.
            let mut creature_config = config.clone();
            creature_config.rng_seed = config
                .rng_seed
                .map(|seed| seed.wrapping_add(unit.0));

            let name = spawn.template.name.clone();
            let mut ai = CreatureAi::builder(unit, spawn.template)
                .config(creature_config)
                .host(Arc::clone(&arena))
                .spell_catalog(spells.clone())
                .ability_lists(lists.clone())
                .build()
                .with_context(|| format!("building AI for {name}"))?;

            ai.just_respawned();
            ai.enter_combat(Some(PLAYER));
            ai.attack_start(PLAYER, true);

            info!(
                unit = %unit,
                creature = %name,
                abilities = ai.abilities().len(),
                distance = spawn.distance,
                "creature placed"
            );

            creatures.push(Tracked {
                ai,
                summary: CreatureSummary::new(unit, name),
            });
        }

        Ok(Self {
            arena,
            spells,
            creatures,
            elapsed_ms: 0,
            drained_events: 0,
        })
    }

    pub fn arena(&self) -> &ArenaWorld {
        &self.arena
    }

    /// Every event the arena recorded, including the ones already drained.
    pub fn events_recorded(&self) -> usize {
        self.drained_events + self.arena.events().len()
    }

    /// Runs `ticks` ticks of `tick_ms` each and returns the running totals.
    pub fn run(&mut self, ticks: u32, tick_ms: u32) -> Summary {
        for _ in 0..ticks {
            self.step(tick_ms);
        }
        self.summary()
    }

    /// One tick: every creature updates, then every cast in flight lands.
    pub fn step(&mut self, tick_ms: u32) {
        let channeling = self.elapsed_ms % PLAYER_CAST_CYCLE_MS < PLAYER_CAST_CYCLE_MS / 2;
        self.arena
            .set_casting(PLAYER, channeling.then_some(PLAYER_SPELL));

        for tracked in &mut self.creatures {
            if let Some(report) = tracked.ai.update(tick_ms) {
                tracked.summary.record(&report, &self.spells);
            }
        }

        self.arena.finish_casts();
        self.drained_events += self.arena.take_events().len();
        self.elapsed_ms += u64::from(tick_ms);
        debug!(elapsed_ms = self.elapsed_ms, "tick complete");
    }

    pub fn summary(&self) -> Summary {
        Summary {
            elapsed_ms: self.elapsed_ms,
            creatures: self
                .creatures
                .iter()
                .map(|tracked| tracked.summary.clone())
                .collect(),
        }
    }
}

/// Per-creature totals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreatureSummary {
    pub unit: UnitId,
    pub name: String,
    pub passes: u32,
    /// Committed casts by spell name.
    pub casts: BTreeMap<String, u32>,
    pub retries: u32,
    pub rejections: u32,
}

impl CreatureSummary {
    fn new(unit: UnitId, name: String) -> Self {
        Self {
            unit,
            name,
            passes: 0,
            casts: BTreeMap::new(),
            retries: 0,
            rejections: 0,
        }
    }

    fn record(&mut self, report: &PassReport, spells: &SpellRegistry) {
        self.passes += 1;
        self.retries += report.retried.len() as u32;
        self.rejections += report.rejected.len() as u32;
        for spell_id in &report.committed {
            let name = spells
                .spell(*spell_id)
                .map_or_else(|| spell_id.to_string(), |spell| spell.name.clone());
            *self.casts.entry(name).or_default() += 1;
        }
    }

    pub fn total_casts(&self) -> u32 {
        self.casts.values().sum()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub elapsed_ms: u64,
    pub creatures: Vec<CreatureSummary>,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "simulated {} ms", self.elapsed_ms)?;
        for creature in &self.creatures {
            writeln!(
                f,
                "{} ({}): {} passes, {} casts, {} retries, {} rejections",
                creature.name,
                creature.unit,
                creature.passes,
                creature.total_casts(),
                creature.retries,
                creature.rejections
            )?;
            for (spell, count) in &creature.casts {
                writeln!(f, "  {spell}: {count}")?;
            }
        }
        Ok(())
    }
}
