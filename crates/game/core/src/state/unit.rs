use core::fmt;

use bitflags::bitflags;

use super::Position;

/// Unique identifier for any unit the host simulation tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u64);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What kind of unit a snapshot describes.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum UnitKind {
    /// Player-controlled character.
    Player,
    /// Server-controlled creature.
    #[default]
    Creature,
    /// Companion or pet bound to another unit.
    Pet,
}

bitflags! {
    /// Client-visible unit flags relevant to AI decisions.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct UnitFlags: u32 {
        const PACIFIED    = 0x0002_0000;
        const TAXI_FLIGHT = 0x0010_0000;
        const FLEEING     = 0x0080_0000;
    }
}

bitflags! {
    /// Server-side unit states.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct UnitState: u32 {
        const STUNNED   = 1 << 0;
        const ROOTED    = 1 << 1;
        const FLEEING   = 1 << 2;
        const SANCTUARY = 1 << 3;
        const CONFUSED  = 1 << 4;
    }
}

/// How a creature responds to nearby hostiles.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ReactState {
    Passive,
    Defensive,
    #[default]
    Aggressive,
}

/// Combat lifecycle of a unit.
///
/// ```text
/// Idle → Engaging → Combat → Idle | Evading → Home → Idle
/// ```
///
/// The host drives transitions; the AI only reads the current phase.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CombatPhase {
    #[default]
    Idle,
    Engaging,
    Combat,
    Evading,
    Home,
}

impl CombatPhase {
    /// Engaging and fighting both count as being in combat.
    pub const fn in_combat(self) -> bool {
        matches!(self, Self::Engaging | Self::Combat)
    }

    /// Evading and walking home both count as evading.
    pub const fn is_evading(self) -> bool {
        matches!(self, Self::Evading | Self::Home)
    }
}

/// Point-in-time view of a unit, produced by the world oracle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitSnapshot {
    pub id: UnitId,
    pub kind: UnitKind,
    pub position: Position,
    pub flags: UnitFlags,
    pub state: UnitState,
    pub phase: CombatPhase,
    pub alive: bool,
    pub spawned: bool,
    pub moving: bool,
    pub combat_target: Option<UnitId>,
}

impl UnitSnapshot {
    /// Creates an alive, spawned, idle unit at `position`.
    pub fn new(id: UnitId, kind: UnitKind, position: Position) -> Self {
        Self {
            id,
            kind,
            position,
            flags: UnitFlags::empty(),
            state: UnitState::empty(),
            phase: CombatPhase::Idle,
            alive: true,
            spawned: true,
            moving: false,
            combat_target: None,
        }
    }

    /// Fleeing through either the client flag or the server state.
    #[inline]
    pub fn is_fleeing(&self) -> bool {
        self.flags.contains(UnitFlags::FLEEING) || self.state.contains(UnitState::FLEEING)
    }

    #[inline]
    pub fn is_rooted(&self) -> bool {
        self.state.contains(UnitState::ROOTED)
    }

    #[inline]
    pub fn is_stunned(&self) -> bool {
        self.state.contains(UnitState::STUNNED)
    }

    #[inline]
    pub fn is_pacified(&self) -> bool {
        self.flags.contains(UnitFlags::PACIFIED)
    }

    #[inline]
    pub fn in_sanctuary(&self) -> bool {
        self.state.contains(UnitState::SANCTUARY)
    }

    #[inline]
    pub fn on_taxi(&self) -> bool {
        self.flags.contains(UnitFlags::TAXI_FLIGHT)
    }

    #[inline]
    pub fn is_player(&self) -> bool {
        self.kind == UnitKind::Player
    }

    #[inline]
    pub fn is_companion(&self) -> bool {
        self.kind == UnitKind::Pet
    }

    #[inline]
    pub fn in_combat(&self) -> bool {
        self.phase.in_combat()
    }

    #[inline]
    pub fn is_evading(&self) -> bool {
        self.phase.is_evading()
    }

    /// Distance between two snapshots.
    pub fn distance_to(&self, other: &UnitSnapshot) -> f32 {
        self.position.distance(&other.position)
    }
}
