//! Static spell definitions.
//!
//! A [`SpellDefinition`] is immutable once the catalog has been loaded and is
//! shared between every creature that references it.

use core::fmt;

use bitflags::bitflags;

/// Identifier of a spell in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellId(pub u32);

impl fmt::Display for SpellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "spell:{}", self.0)
    }
}

bitflags! {
    /// Kinds of target a spell accepts.
    ///
    /// The empty mask means "self only"; see [`TargetMask::SELF`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct TargetMask: u32 {
        const UNIT            = 0x0002;
        const ITEM            = 0x0010;
        const SOURCE_LOCATION = 0x0020;
        const DEST_LOCATION   = 0x0040;
        const UNIT_ENEMY      = 0x0080;
        const UNIT_ALLY       = 0x0100;
        const GAMEOBJECT      = 0x0800;

        const CAN_TARGET_TERRAIN = Self::SOURCE_LOCATION.bits() | Self::DEST_LOCATION.bits();
    }
}

impl TargetMask {
    /// Self-only targeting carries no bits.
    pub const SELF: Self = Self::empty();

    #[inline]
    pub fn is_self_only(self) -> bool {
        self.is_empty()
    }

    #[inline]
    pub fn can_target_terrain(self) -> bool {
        self.intersects(Self::CAN_TARGET_TERRAIN)
    }
}

bitflags! {
    /// Events that interrupt a spell while it is being cast.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct InterruptFlags: u32 {
        const MOVEMENT   = 0x01;
        const PUSHBACK   = 0x02;
        const INTERRUPT  = 0x04;
        const AUTOATTACK = 0x08;
        const DAMAGE     = 0x10;
    }
}

/// Effect categories the AI needs to reason about.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EffectKind {
    SchoolDamage,
    Heal,
    ApplyAura,
    PersistentAreaAura,
    /// Mind control; breaks combat if it is the only contender.
    Charm,
    Summon,
    SummonPet,
    Dispel,
    TriggerSpell,
}

/// One effect slot of a spell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellEffect {
    pub kind: EffectKind,
    pub harmful: bool,
}

impl SpellEffect {
    pub const fn harmful(kind: EffectKind) -> Self {
        Self {
            kind,
            harmful: true,
        }
    }

    pub const fn beneficial(kind: EffectKind) -> Self {
        Self {
            kind,
            harmful: false,
        }
    }
}

/// Where the caster must stand relative to the target's facing.
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
pub enum CastPosition {
    #[default]
    Anywhere,
    /// Caster must be outside the target's front arc (backstab).
    Behind,
    /// Caster must be inside the target's front arc.
    InFront,
}

impl CastPosition {
    /// Checks the requirement given whether the target faces the caster.
    pub const fn is_satisfied(self, target_facing_caster: bool) -> bool {
        match self {
            Self::Anywhere => true,
            Self::Behind => !target_facing_caster,
            Self::InFront => target_facing_caster,
        }
    }
}

/// Immutable spell record.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellDefinition {
    pub id: SpellId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub targets: TargetMask,
    #[cfg_attr(feature = "serde", serde(default))]
    pub interrupt_flags: InterruptFlags,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<SpellEffect>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub position: CastPosition,
    /// Cooldown applied after a cast, in milliseconds.
    #[cfg_attr(feature = "serde", serde(default))]
    pub recovery_ms: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub passive: bool,
}

impl SpellDefinition {
    /// Minimal definition: unit-targeted, no effects.
    pub fn new(id: SpellId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            targets: TargetMask::UNIT,
            interrupt_flags: InterruptFlags::empty(),
            effects: Vec::new(),
            position: CastPosition::Anywhere,
            recovery_ms: 0,
            passive: false,
        }
    }

    #[inline]
    pub fn is_passive(&self) -> bool {
        self.passive
    }

    /// Returns true if any effect slot matches one of `kinds`.
    pub fn has_effect_of_type(&self, kinds: &[EffectKind]) -> bool {
        self.effects.iter().any(|effect| kinds.contains(&effect.kind))
    }

    /// Returns true if the spell has effects and every one of them is harmful.
    pub fn has_only_harmful_effects(&self) -> bool {
        !self.effects.is_empty() && self.effects.iter().all(|effect| effect.harmful)
    }

    #[inline]
    pub fn has_charm_effect(&self) -> bool {
        self.has_effect_of_type(&[EffectKind::Charm])
    }

    #[inline]
    pub fn is_summon(&self) -> bool {
        self.has_effect_of_type(&[EffectKind::SummonPet, EffectKind::Summon])
    }

    /// Casting is broken by caster movement.
    #[inline]
    pub fn is_interrupted_by_movement(&self) -> bool {
        self.interrupt_flags.contains(InterruptFlags::MOVEMENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_mask_is_empty() {
        assert!(TargetMask::SELF.is_self_only());
        assert!(!TargetMask::UNIT.is_self_only());
    }

    #[test]
    fn terrain_mask_covers_both_locations() {
        assert!(TargetMask::DEST_LOCATION.can_target_terrain());
        assert!(TargetMask::SOURCE_LOCATION.can_target_terrain());
        assert!(!(TargetMask::UNIT | TargetMask::UNIT_ENEMY).can_target_terrain());
    }

    #[test]
    fn harmful_only_requires_effects() {
        let mut spell = SpellDefinition::new(SpellId(1), "Shadow Bolt");
        assert!(!spell.has_only_harmful_effects());

        spell.effects.push(SpellEffect::harmful(EffectKind::SchoolDamage));
        assert!(spell.has_only_harmful_effects());

        spell.effects.push(SpellEffect::beneficial(EffectKind::Heal));
        assert!(!spell.has_only_harmful_effects());
    }

    #[test]
    fn position_requirements() {
        assert!(CastPosition::Anywhere.is_satisfied(true));
        assert!(CastPosition::Behind.is_satisfied(false));
        assert!(!CastPosition::Behind.is_satisfied(true));
        assert!(CastPosition::InFront.is_satisfied(true));
        assert!(!CastPosition::InFront.is_satisfied(false));
    }
}
