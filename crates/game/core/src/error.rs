//! Common error infrastructure for creature-core.
//!
//! Domain-specific errors (`CastRejection`, `CatalogError`) live next to the
//! rules that produce them; this module only provides the shared
//! classification every error type implements.

/// How a caller should treat an error.
///
/// - **Recoverable**: a later evaluation pass may succeed without any change
/// - **Validation**: the configured data or request is wrong for this target
/// - **Internal**: unexpected state inconsistency between collaborators
/// - **Fatal**: the AI instance cannot be constructed or cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Temporary condition; re-evaluated next pass.
    ///
    /// Examples: target out of range, chance roll failed
    Recoverable,

    /// Invalid input that will not fix itself.
    ///
    /// Examples: spell reference missing from the catalog, target immune
    Validation,

    /// Collaborators disagree about the world.
    Internal,

    /// Missing required collaborator at construction time.
    Fatal,
}

impl ErrorSeverity {
    /// Lowercase label used in log fields.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// True when a later pass may succeed unchanged.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error must stop startup.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Common trait for all creature AI errors.
///
/// Implementors derive `thiserror::Error` and give every variant a stable
/// `SCREAMING_SNAKE` code.
pub trait AiError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for log fields; the type name unless overridden.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
