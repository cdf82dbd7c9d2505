use crate::error::{AiError, ErrorSeverity};
use crate::spell::CastPosition;

/// Reasons the validator refuses a prospective cast.
///
/// All of these are non-fatal: the scheduler moves on to the next ability.
/// [`CastRejection::RetryChanceFailed`] additionally re-arms that ability's
/// cooldown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum CastRejection {
    #[error("no target resolved")]
    TargetMissing,

    #[error("target does not satisfy the ability's requirements")]
    BadTarget,

    #[error("target is fleeing")]
    FleeingTarget,

    #[error("caster is fleeing")]
    FleeingSelf,

    #[error("target is out of melee range")]
    OutOfRange,

    #[error("target is too close")]
    TooClose,

    #[error("target is reachable or caster can still move")]
    Unreachable,

    #[error("caster must be {0:?} the target")]
    FacingViolation(CastPosition),

    #[error("target is immune to every effect")]
    ImmuneTarget,

    #[error("cannot charm the only contender")]
    CharmRestricted,

    #[error("aura already active")]
    AuraAlreadyActive,

    #[error("chance roll failed")]
    RetryChanceFailed,

    #[error("cast could not be prepared")]
    GenericError,
}

impl CastRejection {
    /// The scheduler re-arms a cooldown for this outcome only.
    #[inline]
    pub const fn is_retry(&self) -> bool {
        matches!(self, Self::RetryChanceFailed)
    }
}

impl AiError for CastRejection {
    fn severity(&self) -> ErrorSeverity {
        use CastRejection::*;
        match self {
            FleeingTarget | FleeingSelf | OutOfRange | TooClose | Unreachable
            | FacingViolation(_) | AuraAlreadyActive | RetryChanceFailed => {
                ErrorSeverity::Recoverable
            }
            TargetMissing | BadTarget | ImmuneTarget | CharmRestricted => {
                ErrorSeverity::Validation
            }
            GenericError => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use CastRejection::*;
        match self {
            TargetMissing => "CAST_TARGET_MISSING",
            BadTarget => "CAST_BAD_TARGET",
            FleeingTarget => "CAST_FLEEING_TARGET",
            FleeingSelf => "CAST_FLEEING_SELF",
            OutOfRange => "CAST_OUT_OF_RANGE",
            TooClose => "CAST_TOO_CLOSE",
            Unreachable => "CAST_UNREACHABLE",
            FacingViolation(CastPosition::Behind) => "CAST_NOT_BEHIND",
            FacingViolation(_) => "CAST_NOT_IN_FRONT",
            ImmuneTarget => "CAST_IMMUNE_TARGET",
            CharmRestricted => "CAST_CHARM_RESTRICTED",
            AuraAlreadyActive => "CAST_AURA_ALREADY_ACTIVE",
            RetryChanceFailed => "CAST_RETRY_CHANCE_FAILED",
            GenericError => "CAST_GENERIC_ERROR",
        }
    }
}
