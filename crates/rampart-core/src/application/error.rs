//! Application layer errors.
//!
//! These errors represent failures in orchestration and in the collaborators
//! reached through ports, not rule violations. Rule violations are
//! `DomainError::InvalidTopology` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The stack metadata provider could not be resolved.
    #[error("Stack metadata unavailable: {reason}")]
    MetadataUnavailable { reason: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("Stack registry error")]
    StoreLockError,

    /// A stack catalog file could not be read or parsed.
    #[error("Failed to load stack catalog {path}: {reason}")]
    CatalogLoad { path: PathBuf, reason: String },

    /// A cluster creation request could not be read or parsed.
    #[error("Failed to load cluster request {path}: {reason}")]
    RequestLoad { path: PathBuf, reason: String },

    /// A rule name did not match any built-in validator.
    #[error("Unknown validation rule: {name}")]
    UnknownRule { name: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MetadataUnavailable { reason } => vec![
                format!("Metadata could not be resolved: {}", reason),
                "Make sure stack definitions are loaded before validating".into(),
            ],
            Self::StoreLockError => vec![
                "The stack registry is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::CatalogLoad { path, .. } => vec![
                format!("Failed to read: {}", path.display()),
                "Check that each stack file is valid TOML".into(),
                "Each file needs an `id = \"NAME-VERSION\"` entry".into(),
            ],
            Self::RequestLoad { path, .. } => vec![
                format!("Failed to read: {}", path.display()),
                "Requests may be written as .toml or .json".into(),
            ],
            Self::UnknownRule { name } => vec![
                format!("'{}' is not a built-in rule", name),
                "Try: rampart rules".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MetadataUnavailable { .. } | Self::StoreLockError => ErrorCategory::Internal,
            Self::CatalogLoad { .. } => ErrorCategory::Configuration,
            Self::RequestLoad { .. } => ErrorCategory::Validation,
            Self::UnknownRule { .. } => ErrorCategory::Configuration,
        }
    }
}
