//! Error kinds for the calculator core.
//!
//! Validation errors are domain-significant and always reach the caller
//! unchanged; every other internal failure is normalized into
//! [`CalcError::Operation`] so callers have a single wrapped-failure kind
//! to handle.

use thiserror::Error;

/// Errors produced by the calculator core.
#[derive(Debug, Error)]
pub enum CalcError {
    /// Invalid configuration values. Fatal at construction, never recovered.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Invalid operand combination rejected by an operation strategy
    /// (e.g. division by zero). Propagated unchanged, never wrapped.
    #[error("{0}")]
    Validation(String),

    /// Any other failure during `perform_operation`, `save_history`, or
    /// `load_history`, carrying the original cause's message.
    #[error("operation failed: {0}")]
    Operation(String),

    /// `remove_observer` was called for a name that is not registered.
    #[error("no observer registered under '{0}'")]
    UnknownObserver(String),
}

impl CalcError {
    /// Check if this is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_detection() {
        assert!(CalcError::Validation("bad operand".into()).is_validation());
        assert!(!CalcError::Operation("io failed".into()).is_validation());
    }

    #[test]
    fn test_display_messages() {
        let err = CalcError::Validation("Division by zero is not allowed.".into());
        assert_eq!(err.to_string(), "Division by zero is not allowed.");

        let err = CalcError::Operation("No operation set".into());
        assert_eq!(err.to_string(), "operation failed: No operation set");

        let err = CalcError::UnknownObserver("autosave".into());
        assert_eq!(err.to_string(), "no observer registered under 'autosave'");
    }
}
