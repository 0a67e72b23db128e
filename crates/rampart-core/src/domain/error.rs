// ============================================================================
// domain/error.rs - TOPOLOGY ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (results are shared across threads in tests and services)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    /// The requested topology violates a validation rule. The message is the
    /// complete, deterministic description produced by that rule.
    #[error("{0}")]
    InvalidTopology(String),

    #[error("Invalid stack id '{value}': {reason}")]
    InvalidStackId { value: String, reason: String },

    #[error("Invalid host group '{name}': {reason}")]
    InvalidHostGroup { name: String, reason: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    // ========================================================================
    // Not Found Errors (404-level equivalent)
    // ========================================================================
    #[error("Stack not registered: {0}")]
    StackNotFound(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidTopology(_) => vec![
                "Fix the reported problems and resubmit the request".into(),
                "Other rules run only after this one passes".into(),
            ],
            Self::InvalidStackId { .. } => vec![
                "Stack ids have the form NAME-VERSION".into(),
                "Example: HDP-3.1".into(),
            ],
            Self::InvalidHostGroup { name, .. } => vec![
                format!("Check the definition of host group '{}'", name),
                "Host group names must be non-empty".into(),
            ],
            Self::StackNotFound(id) => vec![
                format!("Stack '{}' is not registered", id),
                "Try: rampart stacks".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidTopology(_)
            | Self::InvalidStackId { .. }
            | Self::InvalidHostGroup { .. }
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
            Self::StackNotFound(_) => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
