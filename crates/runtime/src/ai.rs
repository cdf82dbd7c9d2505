//! Per-creature AI instance and its builder.
//!
//! A [`CreatureAi`] is created when its unit spawns and lives exactly as long
//! as the unit. The host drives it through [`CreatureAi::update`] every tick
//! and through the lifecycle methods when the unit's state changes.

use std::sync::Arc;

use creature_core::{
    AbilityCatalog, AbilityList, AbilityListOracle, AiConfig, AiReaction, CastTarget,
    CatalogError, CombatController, CooldownTracker, CreatureGroupNotifier, CreatureTemplate,
    MovementController, ReactState, ReactionSink, SpatialOracle, SpellExecutor, SpellOracle,
    TargetMask, TargetScriptOracle, ThreatOracle, UnitId, UnitSnapshot, WorldOracle,
};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace, warn};

use crate::detection::{AlertLimiter, select_proximity_target, send_reaction};
use crate::error::{BuildError, Result};
use crate::hooks::{BehaviorScript, HookDispatcher};
use crate::scheduler::{CastScheduler, PassContext, PassReport, initial_cooldown, run_pass};
use crate::services::AiServices;

/// Autonomous combat behavior for one creature.
pub struct CreatureAi {
    unit: UnitId,
    template: CreatureTemplate,
    config: AiConfig,
    services: AiServices,
    hooks: HookDispatcher,
    rng: Box<dyn RngCore + Send>,

    abilities: AbilityList,
    cooldowns: CooldownTracker,
    scheduler: CastScheduler,
    alerts: AlertLimiter,

    combat_movement: bool,
    melee_disabled: bool,
}

impl CreatureAi {
    /// Create a new builder for `unit`.
    pub fn builder(unit: UnitId, template: CreatureTemplate) -> CreatureAiBuilder {
        CreatureAiBuilder::new(unit, template)
    }

    pub fn unit(&self) -> UnitId {
        self.unit
    }

    pub fn template(&self) -> &CreatureTemplate {
        &self.template
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    pub fn abilities(&self) -> &AbilityList {
        &self.abilities
    }

    pub fn has_ability_list(&self) -> bool {
        !self.abilities.is_empty()
    }

    pub fn cooldowns(&self) -> &CooldownTracker {
        &self.cooldowns
    }

    pub fn scheduler(&self) -> &CastScheduler {
        &self.scheduler
    }

    pub fn alerts(&self) -> &AlertLimiter {
        &self.alerts
    }

    /// Replace the behavior script.
    pub fn set_script(&mut self, script: Box<dyn BehaviorScript>) {
        self.hooks.set_script(script);
    }

    // ===== tick =====

    /// Advance the AI by `elapsed_ms`.
    ///
    /// Returns the report of the evaluation pass if one ran this tick.
    pub fn update(&mut self, elapsed_ms: u32) -> Option<PassReport> {
        // Timers run even while the world has no snapshot for the unit.
        self.advance_timers(elapsed_ms);
        let me = self.snapshot()?;

        if let Some(target) = self.services.threat.hostile_target(self.unit) {
            if me.combat_target != Some(target) {
                debug!(
                    target: "creature_ai::update",
                    unit = %self.unit,
                    victim = %target,
                    "switching to top threat"
                );
                self.services.combat.attack(self.unit, target);
            }
        }

        if !me.alive || !me.in_combat() || !self.has_ability_list() {
            return None;
        }

        if !self.scheduler.tick(elapsed_ms) {
            return None;
        }

        // Re-read: the attack command above may have changed the unit.
        let caster = self.snapshot().unwrap_or(me);
        Some(run_pass(PassContext {
            caster: &caster,
            abilities: &self.abilities,
            cooldowns: &mut self.cooldowns,
            services: &self.services,
            rng: &mut *self.rng,
        }))
    }

    /// Corpse tick: timers only, never casts.
    pub fn update_corpse(&mut self, elapsed_ms: u32) {
        self.advance_timers(elapsed_ms);
    }

    fn advance_timers(&mut self, elapsed_ms: u32) {
        self.alerts.advance(elapsed_ms);
        self.cooldowns.advance(elapsed_ms);
    }

    // ===== lifecycle =====

    /// Spawn or respawn: reload abilities, reset timers, apply template
    /// spells, then run the spawn and idle hooks in that order.
    pub fn just_respawned(&mut self) {
        self.reload_abilities();
        self.initialize_cooldowns();
        self.scheduler.make_due();
        self.alerts.reset();
        self.hooks.rearm();

        for spell_id in &self.template.spells {
            let Some(spell) = self.services.spell_catalog.spell(*spell_id) else {
                warn!(
                    target: "creature_ai::lifecycle",
                    unit = %self.unit,
                    spell = %spell_id,
                    "template spell missing from catalog"
                );
                continue;
            };

            let Some(cast) = self.services.spells.prepare_cast(
                self.unit,
                &spell,
                CastTarget::Unit(self.unit),
                TargetMask::SELF,
                false,
            ) else {
                continue;
            };

            if spell.is_passive() {
                trace!(target: "creature_ai::lifecycle", unit = %self.unit, spell = %spell_id, "applying passive");
                self.services.spells.apply_passive_effects(self.unit, &spell);
            } else if spell.is_summon() {
                trace!(target: "creature_ai::lifecycle", unit = %self.unit, spell = %spell_id, "casting summon");
                self.services.spells.start_cast(self.unit, cast);
            }
        }

        self.hooks.spawn(self.unit);
        self.hooks.idle(self.unit);
    }

    /// Fires the death hook once per death.
    pub fn just_died(&mut self, killer: Option<UnitId>) {
        self.hooks.death(self.unit, killer);
    }

    pub fn damage_taken(&mut self, attacker: UnitId, damage: u32) {
        self.hooks.damage_taken(self.unit, attacker, damage);
    }

    /// Target of a hostile action: record threat and answer players.
    pub fn attacked_by(&mut self, attacker: UnitId) {
        self.services.threat.add_threat(self.unit, attacker);

        let is_player = self
            .services
            .world
            .unit(attacker)
            .is_some_and(|unit| unit.is_player());
        if is_player {
            self.send_ai_reaction(attacker, AiReaction::Hostile);
        }
    }

    /// Engage `victim`: chase, notify the group and roll initial cooldowns.
    pub fn attack_start(&mut self, victim: UnitId, chase: bool) {
        if chase && self.is_melee_attack_enabled() && self.combat_movement {
            self.services.movement.move_chase(self.unit);
        }

        if let Some(group) = &self.services.group {
            group.member_attack_started(self.unit, victim);
        }

        self.initialize_cooldowns();
        debug!(target: "creature_ai::lifecycle", unit = %self.unit, victim = %victim, chase, "attack start");
    }

    pub fn enter_combat(&mut self, source: Option<UnitId>) {
        self.hooks.enter_combat(self.unit, source);
    }

    pub fn receive_emote(&mut self, player: UnitId, emote: u32) {
        self.hooks.emote_received(self.unit, player, emote);
    }

    /// Pause out-of-combat movement while a player talks to the creature.
    pub fn player_interacted(&mut self, player: UnitId) {
        trace!(target: "creature_ai::lifecycle", unit = %self.unit, player = %player, "player interaction");
        self.services
            .movement
            .pause_out_of_combat(self.unit, self.config.interaction_pause_ms);
    }

    pub fn on_scripted_event(&mut self, event_id: u32, data: u32) {
        self.hooks.scripted_event(self.unit, event_id, data);
    }

    // ===== reactions & acquisition =====

    /// Sends `reaction` to `victim`. Returns false if an alert was suppressed.
    pub fn send_ai_reaction(&mut self, victim: UnitId, reaction: AiReaction) -> bool {
        send_reaction(&self.services, &mut self.alerts, self.unit, victim, reaction)
    }

    /// First visible hostile among `unit` (if given) or all known players.
    pub fn get_proximity_target(&mut self, unit: Option<UnitId>) -> Option<UnitId> {
        let me = self.snapshot()?;

        let ids = match unit {
            Some(id) => vec![id],
            None => self.services.world.known_players(self.unit),
        };
        let candidates: Vec<UnitSnapshot> = ids
            .into_iter()
            .filter_map(|id| self.services.world.unit(id))
            .collect();

        let services = &self.services;
        let alerts = &mut self.alerts;
        let source = self.unit;
        let found = select_proximity_target(
            &me,
            self.template.detection_range,
            &candidates,
            services.world.as_ref(),
            services.spatial.as_ref(),
            |victim| {
                send_reaction(services, alerts, source, victim.id, AiReaction::Alert);
            },
        );

        found.map(|victim| victim.id)
    }

    /// Idle, aggressive and able to pick a fight with a known player.
    pub fn is_ready_for_new_attack(&self) -> bool {
        let Some(me) = self.snapshot() else {
            return false;
        };

        me.alive
            && me.spawned
            && !self.services.world.known_players(self.unit).is_empty()
            && self.template.react_state == ReactState::Aggressive
            && !me.in_combat()
            && !me.is_evading()
            && !me.is_stunned()
            && !me.is_pacified()
    }

    /// Joins `ally`'s fight.
    pub fn assist_unit(&mut self, ally: UnitId) {
        let Some(me) = self.snapshot() else {
            return;
        };
        if !me.alive {
            return;
        }

        if let Some(victim) = self
            .services
            .world
            .unit(ally)
            .and_then(|ally| ally.combat_target)
        {
            self.services.combat.attack(self.unit, victim);
        }
    }

    // ===== toggles =====

    pub fn set_combat_movement(&mut self, enabled: bool) {
        self.combat_movement = enabled;
    }

    pub fn is_combat_movement_enabled(&self) -> bool {
        self.combat_movement
    }

    pub fn set_melee_attack(&mut self, enabled: bool) {
        self.melee_disabled = !enabled;
    }

    pub fn is_melee_attack_enabled(&self) -> bool {
        self.template.melee && !self.melee_disabled
    }

    // ===== abilities =====

    /// Resolve the template's ability list again. Returns the dropped entries.
    pub fn reload_abilities(&mut self) -> Vec<CatalogError> {
        let (abilities, dropped) = load_abilities(self.unit, &self.template, &self.services);
        self.abilities = abilities;
        dropped
    }

    fn initialize_cooldowns(&mut self) {
        self.cooldowns.clear();
        for entry in &self.abilities {
            let delay = initial_cooldown(entry, &mut *self.rng);
            self.cooldowns.set(entry.spell_id(), delay);
        }
    }

    fn snapshot(&self) -> Option<UnitSnapshot> {
        self.services.world.unit(self.unit)
    }
}

fn load_abilities(
    unit: UnitId,
    template: &CreatureTemplate,
    services: &AiServices,
) -> (AbilityList, Vec<CatalogError>) {
    let report = AbilityCatalog::resolve(
        template.ability_list,
        services.ability_lists.as_ref(),
        services.spell_catalog.as_ref(),
    );

    for dropped in &report.dropped {
        warn!(
            target: "creature_ai::catalog",
            unit = %unit,
            error = %dropped,
            "dropping ability entry"
        );
    }

    (report.abilities, report.dropped)
}

/// Builder for [`CreatureAi`].
///
/// Every collaborator except the creature-group notifier is required; a
/// missing one fails [`CreatureAiBuilder::build`] instead of surfacing
/// mid-tick.
pub struct CreatureAiBuilder {
    unit: UnitId,
    template: CreatureTemplate,
    config: AiConfig,
    threat: Option<Arc<dyn ThreatOracle>>,
    movement: Option<Arc<dyn MovementController>>,
    combat: Option<Arc<dyn CombatController>>,
    world: Option<Arc<dyn WorldOracle>>,
    spatial: Option<Arc<dyn SpatialOracle>>,
    spells: Option<Arc<dyn SpellExecutor>>,
    script: Option<Arc<dyn TargetScriptOracle>>,
    transport: Option<Arc<dyn ReactionSink>>,
    spell_catalog: Option<Arc<dyn SpellOracle>>,
    ability_lists: Option<Arc<dyn AbilityListOracle>>,
    group: Option<Arc<dyn CreatureGroupNotifier>>,
    behavior: Option<Box<dyn BehaviorScript>>,
    rng: Option<Box<dyn RngCore + Send>>,
}

impl CreatureAiBuilder {
    fn new(unit: UnitId, template: CreatureTemplate) -> Self {
        Self {
            unit,
            template,
            config: AiConfig::default(),
            threat: None,
            movement: None,
            combat: None,
            world: None,
            spatial: None,
            spells: None,
            script: None,
            transport: None,
            spell_catalog: None,
            ability_lists: None,
            group: None,
            behavior: None,
            rng: None,
        }
    }

    /// Override AI configuration
    pub fn config(mut self, config: AiConfig) -> Self {
        self.config = config;
        self
    }

    pub fn threat(mut self, threat: Arc<dyn ThreatOracle>) -> Self {
        self.threat = Some(threat);
        self
    }

    pub fn movement(mut self, movement: Arc<dyn MovementController>) -> Self {
        self.movement = Some(movement);
        self
    }

    pub fn combat(mut self, combat: Arc<dyn CombatController>) -> Self {
        self.combat = Some(combat);
        self
    }

    pub fn world(mut self, world: Arc<dyn WorldOracle>) -> Self {
        self.world = Some(world);
        self
    }

    pub fn spatial(mut self, spatial: Arc<dyn SpatialOracle>) -> Self {
        self.spatial = Some(spatial);
        self
    }

    pub fn spell_executor(mut self, spells: Arc<dyn SpellExecutor>) -> Self {
        self.spells = Some(spells);
        self
    }

    pub fn target_script(mut self, script: Arc<dyn TargetScriptOracle>) -> Self {
        self.script = Some(script);
        self
    }

    pub fn transport(mut self, transport: Arc<dyn ReactionSink>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn spell_catalog(mut self, catalog: Arc<dyn SpellOracle>) -> Self {
        self.spell_catalog = Some(catalog);
        self
    }

    pub fn ability_lists(mut self, lists: Arc<dyn AbilityListOracle>) -> Self {
        self.ability_lists = Some(lists);
        self
    }

    /// Set creature-group notifier (optional)
    pub fn group(mut self, group: Arc<dyn CreatureGroupNotifier>) -> Self {
        self.group = Some(group);
        self
    }

    /// Set behavior script (optional, defaults to no-op)
    pub fn behavior(mut self, script: Box<dyn BehaviorScript>) -> Self {
        self.behavior = Some(script);
        self
    }

    /// Set random source (optional)
    ///
    /// Without one, a ChaCha generator is seeded from `config.rng_seed`, or
    /// from OS entropy when no seed is configured.
    pub fn rng(mut self, rng: Box<dyn RngCore + Send>) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Wires every world-side collaborator to one host object.
    pub fn host<H>(self, host: Arc<H>) -> Self
    where
        H: ThreatOracle
            + MovementController
            + CombatController
            + WorldOracle
            + SpatialOracle
            + SpellExecutor
            + TargetScriptOracle
            + ReactionSink
            + CreatureGroupNotifier
            + 'static,
    {
        self.threat(host.clone())
            .movement(host.clone())
            .combat(host.clone())
            .world(host.clone())
            .spatial(host.clone())
            .spell_executor(host.clone())
            .target_script(host.clone())
            .transport(host.clone())
            .group(host)
    }

    /// Build the AI instance.
    ///
    /// Resolves the ability list once; call [`CreatureAi::just_respawned`]
    /// afterwards to run the spawn sequence.
    pub fn build(self) -> Result<CreatureAi> {
        let services = AiServices {
            threat: self.threat.ok_or(BuildError::MissingThreatTracker)?,
            movement: self.movement.ok_or(BuildError::MissingMovement)?,
            combat: self.combat.ok_or(BuildError::MissingCombat)?,
            world: self.world.ok_or(BuildError::MissingWorld)?,
            spatial: self.spatial.ok_or(BuildError::MissingSpatial)?,
            spells: self.spells.ok_or(BuildError::MissingSpellExecutor)?,
            script: self.script.ok_or(BuildError::MissingTargetScript)?,
            transport: self.transport.ok_or(BuildError::MissingTransport)?,
            spell_catalog: self.spell_catalog.ok_or(BuildError::MissingSpellCatalog)?,
            ability_lists: self.ability_lists.ok_or(BuildError::MissingAbilityLists)?,
            group: self.group,
        };

        if services.world.unit(self.unit).is_none() {
            return Err(BuildError::UnitNotFound(self.unit));
        }

        let rng = self.rng.unwrap_or_else(|| match self.config.rng_seed {
            Some(seed) => Box::new(ChaCha8Rng::seed_from_u64(seed)),
            None => Box::new(ChaCha8Rng::from_entropy()),
        });

        let (abilities, _) = load_abilities(self.unit, &self.template, &services);

        debug!(
            target: "creature_ai::lifecycle",
            unit = %self.unit,
            creature = %self.template.name,
            abilities = abilities.len(),
            "creature AI built"
        );

        Ok(CreatureAi {
            unit: self.unit,
            scheduler: CastScheduler::new(self.config.casting_delay_ms),
            alerts: AlertLimiter::new(self.config.alert_cooldown_ms),
            hooks: self
                .behavior
                .map(HookDispatcher::new)
                .unwrap_or_default(),
            template: self.template,
            config: self.config,
            services,
            rng,
            abilities,
            cooldowns: CooldownTracker::new(),
            combat_movement: true,
            melee_disabled: false,
        })
    }
}
