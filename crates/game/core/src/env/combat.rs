//! Threat ranking, movement and combat commands.

use crate::state::UnitId;

/// Read access to a creature's externally owned threat list.
///
/// `add_threat` is the only write and is forwarded straight to the owner of
/// the list; the AI never caches or reorders entries.
pub trait ThreatOracle: Send + Sync {
    /// Current top-threat hostile target of `owner`.
    fn hostile_target(&self, owner: UnitId) -> Option<UnitId>;

    /// Number of units on `owner`'s threat list.
    fn contender_count(&self, owner: UnitId) -> usize;

    /// Records an attacker on `owner`'s threat list.
    fn add_threat(&self, owner: UnitId, attacker: UnitId);
}

/// Movement commands for a controlled unit.
pub trait MovementController: Send + Sync {
    fn stop(&self, unit: UnitId);

    /// Start following the current combat target.
    fn move_chase(&self, unit: UnitId);

    fn face_target(&self, unit: UnitId, target: UnitId);

    /// Suspend waypoint/random movement while out of combat.
    fn pause_out_of_combat(&self, unit: UnitId, duration_ms: u32);
}

/// Combat commands for a controlled unit.
pub trait CombatController: Send + Sync {
    /// Switch (or start) melee/combat against `victim`.
    fn attack(&self, unit: UnitId, victim: UnitId);
}

/// Creature formation that reacts when one member engages.
pub trait CreatureGroupNotifier: Send + Sync {
    fn member_attack_started(&self, member: UnitId, victim: UnitId);
}
