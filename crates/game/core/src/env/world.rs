//! Unit lookup and spatial probes.

use crate::spell::SpellId;
use crate::state::{Position, UnitId, UnitSnapshot};

/// Oracle exposing read-only views of units known to the host.
pub trait WorldOracle: Send + Sync {
    /// Snapshot of a unit, or `None` if it no longer exists.
    fn unit(&self, id: UnitId) -> Option<UnitSnapshot>;

    /// Returns true if `unit` carries an aura applied by `spell`.
    fn has_aura(&self, unit: UnitId, spell: SpellId) -> bool;

    /// Players currently known to (in visibility range of) `observer`.
    fn known_players(&self, observer: UnitId) -> Vec<UnitId>;

    /// Faction hostility between two units.
    fn is_hostile(&self, a: UnitId, b: UnitId) -> bool;
}

/// Result of a stealth/visibility probe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Detection {
    /// The observer can see the target.
    pub detected: bool,
    /// The target is close enough to provoke an alert reaction.
    pub alert: bool,
}

impl Detection {
    pub const VISIBLE: Self = Self {
        detected: true,
        alert: false,
    };

    pub const HIDDEN: Self = Self {
        detected: false,
        alert: false,
    };

    /// Hidden, but close enough to make the observer suspicious.
    pub const SUSPICIOUS: Self = Self {
        detected: false,
        alert: true,
    };
}

/// Oracle answering geometric and pathing questions.
pub trait SpatialOracle: Send + Sync {
    /// Melee/interaction distance check between two units.
    fn within_interaction_distance(&self, a: &UnitSnapshot, b: &UnitSnapshot) -> bool;

    /// Whether a walkable path exists from `from` to `to`.
    fn can_reach(&self, from: &UnitSnapshot, to: &UnitSnapshot) -> bool;

    /// Unobstructed line of sight between the two units.
    fn line_of_sight(&self, from: &UnitSnapshot, to: &UnitSnapshot) -> bool;

    /// Stealth and invisibility arbitration for `observer` looking at `target`.
    fn detect(&self, observer: &UnitSnapshot, target: &UnitSnapshot, distance: f32) -> Detection;

    /// Returns true if `point` lies within `arc` radians of `observer`'s facing.
    fn has_in_arc(&self, observer: &UnitSnapshot, point: &Position, arc: f32) -> bool {
        observer.position.has_in_arc(point, arc)
    }
}
