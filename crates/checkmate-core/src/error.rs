//! Error raised when a chain is asked for a guarantee it cannot give.

use crate::types::describe_error;
use std::fmt;

/// A chain ended with at least one check that did not pass.
///
/// Returned by the `or_fail` and `get_or_fail` shortcuts; any other error
/// type can be produced with `or_throw` and `get_or_throw`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ChecksFailed {
    message: String,
}

impl ChecksFailed {
    /// Default message used when none is given.
    pub const DEFAULT_MESSAGE: &'static str = "One or more checks failed";

    /// Creates an error with a custom message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Creates an error that also names its underlying cause.
    ///
    /// Renders as `"<message>\n<CauseType>: <cause>"`.
    #[must_use]
    pub fn with_cause<E: fmt::Display + ?Sized>(message: impl Into<String>, cause: &E) -> Self {
        Self {
            message: format!("{}\n{}", message.into(), describe_error(cause)),
        }
    }

    /// Returns the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for ChecksFailed {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_message() {
        assert_eq!(
            ChecksFailed::default().to_string(),
            "One or more checks failed"
        );
    }

    #[test]
    fn with_cause_appends_cause_line() {
        let cause = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err = ChecksFailed::with_cause("keystore is unusable", &cause);
        assert_eq!(err.message(), "keystore is unusable\nError: read-only");
    }
}
