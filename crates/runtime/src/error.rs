//! Construction-time failures of the AI engine.
//!
//! Everything the engine does per tick is infallible from the host's point of
//! view: rejected casts and unresolved targets are normal outcomes. The only
//! hard failures are missing collaborators, surfaced once by
//! [`crate::CreatureAiBuilder::build`].
use creature_core::{AiError, ErrorSeverity, UnitId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BuildError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("creature AI requires a threat tracker")]
    MissingThreatTracker,

    #[error("creature AI requires a movement controller")]
    MissingMovement,

    #[error("creature AI requires a combat controller")]
    MissingCombat,

    #[error("creature AI requires a world oracle")]
    MissingWorld,

    #[error("creature AI requires a spatial oracle")]
    MissingSpatial,

    #[error("creature AI requires a spell executor")]
    MissingSpellExecutor,

    #[error("creature AI requires a target script oracle")]
    MissingTargetScript,

    #[error("creature AI requires a reaction sink")]
    MissingTransport,

    #[error("creature AI requires a spell catalog")]
    MissingSpellCatalog,

    #[error("creature AI requires an ability list store")]
    MissingAbilityLists,

    #[error("controlled unit {0} is not known to the world")]
    UnitNotFound(UnitId),
}

impl AiError for BuildError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use BuildError::*;
        match self {
            MissingThreatTracker => "BUILD_MISSING_THREAT_TRACKER",
            MissingMovement => "BUILD_MISSING_MOVEMENT",
            MissingCombat => "BUILD_MISSING_COMBAT",
            MissingWorld => "BUILD_MISSING_WORLD",
            MissingSpatial => "BUILD_MISSING_SPATIAL",
            MissingSpellExecutor => "BUILD_MISSING_SPELL_EXECUTOR",
            MissingTargetScript => "BUILD_MISSING_TARGET_SCRIPT",
            MissingTransport => "BUILD_MISSING_TRANSPORT",
            MissingSpellCatalog => "BUILD_MISSING_SPELL_CATALOG",
            MissingAbilityLists => "BUILD_MISSING_ABILITY_LISTS",
            UnitNotFound(_) => "BUILD_UNIT_NOT_FOUND",
        }
    }
}
