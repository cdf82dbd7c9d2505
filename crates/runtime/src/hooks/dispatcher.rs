use creature_core::UnitId;
use tracing::debug;

use super::{BehaviorScript, NoopScript};

/// Routes lifecycle moments to a behavior script.
pub struct HookDispatcher {
    script: Box<dyn BehaviorScript>,
    death_armed: bool,
}

impl Default for HookDispatcher {
    fn default() -> Self {
        Self::new(Box::new(NoopScript))
    }
}

impl HookDispatcher {
    pub fn new(script: Box<dyn BehaviorScript>) -> Self {
        Self {
            script,
            death_armed: true,
        }
    }

    /// Replaces the script; pending once-only state is kept.
    pub fn set_script(&mut self, script: Box<dyn BehaviorScript>) {
        self.script = script;
    }

    /// Allows the next death to fire its hook.
    pub fn rearm(&mut self) {
        self.death_armed = true;
    }

    pub fn spawn(&mut self, unit: UnitId) {
        debug!(target: "creature_ai::hooks", unit = %unit, "spawn hook");
        self.script.on_spawn(unit);
    }

    pub fn idle(&mut self, unit: UnitId) {
        debug!(target: "creature_ai::hooks", unit = %unit, "idle hook");
        self.script.on_idle(unit);
    }

    /// Fires the death hook once per death. Returns false if already fired.
    pub fn death(&mut self, unit: UnitId, killer: Option<UnitId>) -> bool {
        if !self.death_armed {
            debug!(
                target: "creature_ai::hooks",
                unit = %unit,
                "death hook already fired, ignoring"
            );
            return false;
        }
        self.death_armed = false;
        debug!(target: "creature_ai::hooks", unit = %unit, killer = ?killer, "death hook");
        self.script.on_death(unit, killer);
        true
    }

    pub fn damage_taken(&mut self, unit: UnitId, attacker: UnitId, damage: u32) {
        debug!(
            target: "creature_ai::hooks",
            unit = %unit,
            attacker = %attacker,
            damage,
            "damage taken hook"
        );
        self.script.on_damage_taken(unit, attacker, damage);
    }

    pub fn enter_combat(&mut self, unit: UnitId, source: Option<UnitId>) {
        debug!(target: "creature_ai::hooks", unit = %unit, source = ?source, "enter combat hook");
        self.script.on_enter_combat(unit, source);
    }

    pub fn emote_received(&mut self, unit: UnitId, player: UnitId, emote: u32) {
        debug!(target: "creature_ai::hooks", unit = %unit, player = %player, emote, "emote hook");
        self.script.on_emote_received(unit, player, emote);
    }

    pub fn scripted_event(&mut self, unit: UnitId, event_id: u32, data: u32) {
        debug!(target: "creature_ai::hooks", unit = %unit, event_id, data, "scripted event hook");
        self.script.on_scripted_event(unit, event_id, data);
    }
}
