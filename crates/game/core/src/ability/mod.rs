//! Ability entries: the configured cast rules bound to a creature template.
//!
//! Raw entries come from content data and reference spells by id. The
//! [`AbilityCatalog`] resolves them against the spell oracle once per load or
//! respawn; entries that fail resolution never reach the scheduler.
mod catalog;

use std::sync::Arc;

use bitflags::bitflags;

use crate::spell::{SpellDefinition, SpellId};

pub use catalog::{AbilityCatalog, AbilityList, CatalogError, CatalogReport};

/// Identifier of an ability list in the content catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityListId(pub u32);

bitflags! {
    /// Per-entry rules controlling when an ability may be cast.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct CastFlags: u32 {
        /// Cancel the caster's colliding cast when the target is casting.
        const INTERRUPT_PREVIOUS = 0x001;
        /// Cast instantly, ignoring the one-cast-per-pass rule.
        const TRIGGERED          = 0x002;
        /// Skip the caster-side checks (fleeing, facing, immunity, charm).
        const FORCE_CAST         = 0x004;
        /// Primary ranged attack; the caster stops moving to use it.
        const MAIN_RANGED_SPELL  = 0x008;
        /// Only when the target cannot be reached on foot.
        const TARGET_UNREACHABLE = 0x010;
        /// Only when the target does not already carry the aura.
        const AURA_NOT_PRESENT   = 0x020;
        /// Only within melee interaction distance.
        const ONLY_IN_MELEE      = 0x040;
        /// Only outside melee interaction distance.
        const NOT_IN_MELEE       = 0x080;
        /// Only while the target is casting.
        const TARGET_CASTING     = 0x100;
    }
}

impl CastFlags {
    /// Flags that let an ability bypass single-cast exclusivity.
    pub const EXCLUSIVITY_EXEMPT: Self =
        Self::from_bits_retain(Self::TRIGGERED.bits() | Self::INTERRUPT_PREVIOUS.bits());
}

/// Script target specifier, interpreted by the external target-lookup service.
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
pub enum TargetType {
    /// The target handed in by the caller.
    Provided,
    /// Current top-threat victim.
    #[default]
    Hostile,
    HostileSecondAggro,
    HostileLastAggro,
    HostileRandom,
    HostileRandomNotTop,
    /// The caster itself.
    SelfTarget,
    OwnerOrSelf,
    Owner,
    /// Friendly unit below `param1` percent health within `param2` yards.
    FriendlyInjured,
    /// Friendly unit missing the spell's aura within `param1` yards.
    FriendlyMissingBuff,
    /// Crowd-controlled friendly unit within `param1` yards.
    FriendlyCrowdControlled,
}

/// Ability entry as stored in content, before spell resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawAbilityEntry {
    pub spell: SpellId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: CastFlags,
    /// Cast probability in percent; 0 means no chance gate.
    #[cfg_attr(feature = "serde", serde(default))]
    pub chance: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: TargetType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target_param1: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target_param2: i32,
    /// Lower bound of the initial cooldown, in seconds.
    #[cfg_attr(feature = "serde", serde(default))]
    pub delay_init_min: u32,
    /// Upper bound of the initial cooldown, in seconds.
    #[cfg_attr(feature = "serde", serde(default))]
    pub delay_init_max: u32,
}

impl RawAbilityEntry {
    pub fn new(spell: SpellId) -> Self {
        Self {
            spell,
            flags: CastFlags::empty(),
            chance: 0,
            target: TargetType::Hostile,
            target_param1: 0,
            target_param2: 0,
            delay_init_min: 0,
            delay_init_max: 0,
        }
    }
}

/// Resolved ability entry bound to its spell definition.
#[derive(Clone, Debug, PartialEq)]
pub struct AbilityEntry {
    pub spell: Arc<SpellDefinition>,
    pub flags: CastFlags,
    /// `None` disables the chance gate.
    pub chance: Option<u8>,
    pub target: TargetType,
    pub target_param1: u32,
    /// Stored as a magnitude; the sign carries no meaning for lookups.
    pub target_param2: u32,
    /// Initial cooldown bounds in seconds, `min <= max`.
    pub delay_init: (u32, u32),
}

impl AbilityEntry {
    /// Binds a raw entry to its resolved spell.
    ///
    /// Chances above 100 are clamped and a zero chance disables the gate.
    /// Inverted delay bounds collapse onto the minimum.
    pub fn resolve(raw: &RawAbilityEntry, spell: Arc<SpellDefinition>) -> Self {
        let chance = match raw.chance {
            0 => None,
            value => Some(value.min(100)),
        };
        let delay_min = raw.delay_init_min;
        let delay_max = raw.delay_init_max.max(delay_min);

        Self {
            spell,
            flags: raw.flags,
            chance,
            target: raw.target,
            target_param1: raw.target_param1,
            target_param2: raw.target_param2.unsigned_abs(),
            delay_init: (delay_min, delay_max),
        }
    }

    #[inline]
    pub fn spell_id(&self) -> SpellId {
        self.spell.id
    }

    #[inline]
    pub fn is_triggered(&self) -> bool {
        self.flags.contains(CastFlags::TRIGGERED)
    }

    /// Triggered and interrupt-capable abilities ignore the exclusive-cast slot.
    #[inline]
    pub fn is_exclusivity_exempt(&self) -> bool {
        self.flags.intersects(CastFlags::EXCLUSIVITY_EXEMPT)
    }

    /// The caster should stop moving before committing this ability.
    pub fn halts_movement(&self) -> bool {
        self.spell.is_interrupted_by_movement() || self.flags.contains(CastFlags::MAIN_RANGED_SPELL)
    }
}
