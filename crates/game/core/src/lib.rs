//! Deterministic rules and data types for the creature combat AI.
//!
//! `creature-core` defines the canonical data model (units, spells, ability
//! entries), the pure cast-validation chain, cooldown bookkeeping, and the
//! collaborator traits the AI engine consumes. Nothing here logs or performs
//! I/O; orchestration lives in the `creature-ai` crate and content loading in
//! `creature-content`.
pub mod ability;
pub mod cast;
pub mod config;
pub mod env;
pub mod error;
pub mod rng;
pub mod spell;
pub mod state;
pub mod template;

pub use ability::{
    AbilityCatalog, AbilityEntry, AbilityList, AbilityListId, CastFlags, CatalogError,
    CatalogReport, RawAbilityEntry, TargetType,
};
pub use cast::{
    CastApproval, CastFacts, CastRejection, CastRequest, CastTarget, CastVerdict,
    CooldownTracker, ProspectiveCast, validate,
};
pub use config::AiConfig;
pub use env::{
    AbilityListOracle, AiReaction, CombatController, CreatureGroupNotifier, Detection,
    MovementController, ReactionSignal, ReactionSink, SpatialOracle, SpellExecutor, SpellOracle,
    TargetScriptOracle, ThreatOracle, WorldOracle,
};
pub use error::{AiError, ErrorSeverity};
pub use rng::AiRng;
pub use spell::{
    CastPosition, EffectKind, InterruptFlags, SpellDefinition, SpellEffect, SpellId, TargetMask,
};
pub use state::{
    CombatPhase, Position, ReactState, UnitFlags, UnitId, UnitKind, UnitSnapshot, UnitState,
};
pub use template::CreatureTemplate;
