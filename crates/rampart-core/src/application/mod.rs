//! Application layer for Rampart.
//!
//! This layer contains:
//! - **Validators**: The validator contract, built-in rules, and the chain
//! - **Services**: Use case orchestration (ValidationService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types

pub mod error;
pub mod ports;
pub mod services;
pub mod validators;

// Re-export main services
pub use services::{ValidationOutcome, ValidationService};

pub use validators::{
    FnValidator, RejectEmptyHostGroups, RejectUnknownComponents, RejectUnknownConfigTypes,
    RejectUnknownStacks, RequiredPasswordValidator, TopologyValidator, ValidationRule,
    ValidatorChain, ValidatorChainBuilder,
};

// Re-export port traits (for adapter implementation)
pub use ports::{MetadataHandle, MetadataSlot, StackMetadataProvider};

pub use error::ApplicationError;
