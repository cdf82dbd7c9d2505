//! Collaborator bundle shared by every stage of the engine.

use std::sync::Arc;

use creature_core::{
    AbilityListOracle, CastFacts, CombatController, CreatureGroupNotifier, MovementController,
    Position, ReactionSink, SpatialOracle, SpellExecutor, SpellId, SpellOracle,
    TargetScriptOracle, ThreatOracle, UnitId, UnitSnapshot, WorldOracle,
};

/// Every external capability one AI instance talks to.
///
/// Cloning is cheap; the collaborators themselves are shared.
#[derive(Clone)]
pub struct AiServices {
    pub threat: Arc<dyn ThreatOracle>,
    pub movement: Arc<dyn MovementController>,
    pub combat: Arc<dyn CombatController>,
    pub world: Arc<dyn WorldOracle>,
    pub spatial: Arc<dyn SpatialOracle>,
    pub spells: Arc<dyn SpellExecutor>,
    pub script: Arc<dyn TargetScriptOracle>,
    pub transport: Arc<dyn ReactionSink>,
    pub spell_catalog: Arc<dyn SpellOracle>,
    pub ability_lists: Arc<dyn AbilityListOracle>,
    pub group: Option<Arc<dyn CreatureGroupNotifier>>,
}

impl AiServices {
    /// Read-only view used by the cast validator.
    pub fn cast_facts(&self) -> ServiceFacts<'_> {
        ServiceFacts { services: self }
    }
}

/// [`CastFacts`] answered by the live collaborators.
pub struct ServiceFacts<'a> {
    services: &'a AiServices,
}

impl CastFacts for ServiceFacts<'_> {
    fn is_casting(&self, unit: UnitId) -> bool {
        self.services.spells.is_casting(unit)
    }

    fn is_spell_active(&self, unit: UnitId, spell: SpellId) -> bool {
        self.services.spells.is_spell_active(unit, spell)
    }

    fn has_aura(&self, unit: UnitId, spell: SpellId) -> bool {
        self.services.world.has_aura(unit, spell)
    }

    fn within_interaction_distance(&self, a: &UnitSnapshot, b: &UnitSnapshot) -> bool {
        self.services.spatial.within_interaction_distance(a, b)
    }

    fn can_reach(&self, from: &UnitSnapshot, to: &UnitSnapshot) -> bool {
        self.services.spatial.can_reach(from, to)
    }

    fn has_in_arc(&self, observer: &UnitSnapshot, point: &Position, arc: f32) -> bool {
        self.services.spatial.has_in_arc(observer, point, arc)
    }

    fn threat_contenders(&self, owner: UnitId) -> usize {
        self.services.threat.contender_count(owner)
    }
}
