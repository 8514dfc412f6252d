//! Shared error classification.
//!
//! Each failure domain keeps its own enum beside the code that raises it:
//! [`ActionError`](crate::engine::ActionError) for rejected player actions and
//! [`TemplateError`](crate::env::TemplateError) for missing static data.
//! Misses, failed flee rolls and lost turns are round outcomes, not errors.

/// How a caller should react to an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The round is still open; another action may succeed
    /// (meter too low, flee disallowed, ally already called).
    Recoverable,
    /// The action itself is malformed for the current field
    /// (move index out of range, fainted switch target).
    Validation,
    /// Content references something that does not exist. The engine falls back
    /// to a default, but the data should be fixed.
    Internal,
}

impl ErrorSeverity {
    /// Whether the player can simply pick another action.
    pub const fn allows_retry(self) -> bool {
        matches!(self, Self::Recoverable | Self::Validation)
    }
}

/// Implemented by every error enum in this crate.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for logs and assertions.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_content_errors_block_retry() {
        assert!(ErrorSeverity::Recoverable.allows_retry());
        assert!(ErrorSeverity::Validation.allows_retry());
        assert!(!ErrorSeverity::Internal.allows_retry());
        assert_eq!(ErrorSeverity::Internal.to_string(), "internal");
    }
}
