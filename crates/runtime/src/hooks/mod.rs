//! Lifecycle hooks for per-creature behavior scripts.
//!
//! Hosts plug a [`BehaviorScript`] into each AI instance. Every callback has a
//! no-op default, so a script only overrides the moments it cares about.
//! [`HookDispatcher`] owns the script and enforces at-most-once delivery where
//! the lifecycle requires it.
mod dispatcher;

use creature_core::UnitId;

pub use dispatcher::HookDispatcher;

/// Per-creature scripted reactions to lifecycle moments.
pub trait BehaviorScript: Send {
    /// Unit spawned or respawned, after passives and summons were applied.
    fn on_spawn(&mut self, _unit: UnitId) {}

    /// Unit settled into its idle state after spawning.
    fn on_idle(&mut self, _unit: UnitId) {}

    fn on_death(&mut self, _unit: UnitId, _killer: Option<UnitId>) {}

    fn on_damage_taken(&mut self, _unit: UnitId, _attacker: UnitId, _damage: u32) {}

    /// `source` is `None` when combat started without a known aggressor.
    fn on_enter_combat(&mut self, _unit: UnitId, _source: Option<UnitId>) {}

    fn on_emote_received(&mut self, _unit: UnitId, _player: UnitId, _emote: u32) {}

    fn on_scripted_event(&mut self, _unit: UnitId, _event_id: u32, _data: u32) {}
}

/// Script with no behavior.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopScript;

impl BehaviorScript for NoopScript {}
