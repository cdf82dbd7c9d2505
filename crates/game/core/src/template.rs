//! Static per-creature-type data.

use crate::ability::AbilityListId;
use crate::spell::SpellId;
use crate::state::ReactState;

/// Creature template as seen by the AI.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureTemplate {
    pub name: String,

    /// Ability list resolved on spawn and on every respawn.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ability_list: Option<AbilityListId>,

    /// Radius for proximity target acquisition.
    #[cfg_attr(feature = "serde", serde(default = "CreatureTemplate::default_detection_range"))]
    pub detection_range: f32,

    /// Spells applied on respawn: passives get their effects, summons are cast.
    #[cfg_attr(feature = "serde", serde(default))]
    pub spells: Vec<SpellId>,

    #[cfg_attr(feature = "serde", serde(default = "CreatureTemplate::default_melee"))]
    pub melee: bool,

    #[cfg_attr(feature = "serde", serde(default))]
    pub react_state: ReactState,
}

impl CreatureTemplate {
    pub const DEFAULT_DETECTION_RANGE: f32 = 20.0;

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ability_list: None,
            detection_range: Self::DEFAULT_DETECTION_RANGE,
            spells: Vec::new(),
            melee: true,
            react_state: ReactState::default(),
        }
    }

    pub fn with_ability_list(mut self, list: AbilityListId) -> Self {
        self.ability_list = Some(list);
        self
    }

    pub fn with_spells(mut self, spells: impl IntoIterator<Item = SpellId>) -> Self {
        self.spells = spells.into_iter().collect();
        self
    }

    #[cfg_attr(not(feature = "serde"), allow(dead_code))]
    fn default_detection_range() -> f32 {
        Self::DEFAULT_DETECTION_RANGE
    }

    #[cfg_attr(not(feature = "serde"), allow(dead_code))]
    fn default_melee() -> bool {
        true
    }
}
