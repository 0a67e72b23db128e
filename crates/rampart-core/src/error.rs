//! Unified error handling for Rampart Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Rampart Core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RampartError {
    /// Errors from the domain layer. Rendered without a prefix so that a
    /// rejected topology reads exactly as the rule reported it.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl RampartError {
    /// Shorthand for a topology validation failure.
    pub fn invalid_topology(message: impl Into<String>) -> Self {
        Self::Domain(DomainError::InvalidTopology(message.into()))
    }

    /// `true` if this error is a rejected topology (a caller/request error).
    pub fn is_topology_rejection(&self) -> bool {
        matches!(self, Self::Domain(DomainError::InvalidTopology(_)))
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in Rampart".into(),
                "Please report this issue at: https://github.com/rampart-rs/rampart/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Check if this error is retryable.
    ///
    /// A rejected topology is a request error and is never retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Application(ApplicationError::StoreLockError))
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type RampartResult<T> = Result<T, RampartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topology_rejection_displays_bare_message() {
        let err = RampartError::invalid_topology("Unknown stacks found: X-1.0");
        assert_eq!(err.to_string(), "Unknown stacks found: X-1.0");
        assert!(err.is_topology_rejection());
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn rejections_are_not_retryable() {
        assert!(!RampartError::invalid_topology("nope").is_retryable());
        assert!(RampartError::Application(ApplicationError::StoreLockError).is_retryable());
    }

    #[test]
    fn metadata_unavailable_is_internal() {
        let err: RampartError = ApplicationError::MetadataUnavailable {
            reason: "not loaded".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert!(!err.is_topology_rejection());
    }
}
