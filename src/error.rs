//! Error taxonomy of the dispatch core.
//!
//! Selection failures surface as [`CallError`]; failures raised by the
//! native callable itself are wrapped in [`NativeError`] and propagated
//! verbatim. The per-position conversion failure lives with the
//! conversion table ([`crate::conversion::NoApplicableConversion`]) and
//! never escapes a call: the tournament recovers from it by
//! disqualifying the candidate.

use thiserror::Error;

/// Failure raised by a native callable, propagated out of
/// [`OverloadedSet::call`](crate::dispatch::OverloadedSet::call) after
/// the garbage sink has released.
#[derive(Debug, Error)]
#[error("native function raised: {source}")]
pub struct NativeError {
    #[from]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl NativeError {
    /// Wrap a host-side failure.
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        NativeError {
            source: source.into(),
        }
    }

    /// Build from a bare message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(message.into())
    }
}

/// Errors surfaced to the embedding runtime by
/// [`OverloadedSet::call`](crate::dispatch::OverloadedSet::call).
#[derive(Debug, Error)]
pub enum CallError {
    /// The call site passed more arguments than the dispatch core
    /// supports. Raised before any frontend interaction.
    #[error("argument limit exceeded")]
    ArgumentArrayLimitExceeded,

    /// No candidate produced a possible conversion route vector.
    #[error("no overloaded member matches arguments")]
    OverloadingNoMatch,

    /// Two or more non-identical candidates tied as best.
    #[error("call is ambiguous with given arguments")]
    OverloadingAmbiguity,

    /// The selected native function failed.
    #[error(transparent)]
    Native(#[from] NativeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_stable() {
        assert_eq!(
            CallError::ArgumentArrayLimitExceeded.to_string(),
            "argument limit exceeded"
        );
        assert_eq!(
            CallError::OverloadingNoMatch.to_string(),
            "no overloaded member matches arguments"
        );
        assert_eq!(
            CallError::OverloadingAmbiguity.to_string(),
            "call is ambiguous with given arguments"
        );
    }

    #[test]
    fn test_native_error_is_transparent() {
        let err = CallError::from(NativeError::msg("division by zero"));
        assert_eq!(err.to_string(), "native function raised: division by zero");
    }
}
