//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `rampart-adapters` crate provides implementations.

use crate::domain::{StackDefinition, StackId};

/// Port for stack metadata lookups.
///
/// Implemented by:
/// - `rampart_adapters::InMemoryStackRegistry` (built-in and catalog stacks)
///
/// ## Design Notes
///
/// - Queries are read-only and must be safe under concurrent access; many
///   validation requests may run against one provider at the same time
/// - Lookups are expected to be in-memory or cached; an implementation
///   backed by I/O blocks only the calling thread
pub trait StackMetadataProvider: Send + Sync {
    /// Is this stack registered?
    fn is_known_stack(&self, id: &StackId) -> bool;

    /// Full definition of a registered stack, `None` if unknown.
    fn stack_definition(&self, id: &StackId) -> Option<StackDefinition>;
}

#[cfg(test)]
mockall::mock! {
    pub StackMetadataProvider {}

    impl StackMetadataProvider for StackMetadataProvider {
        fn is_known_stack(&self, id: &StackId) -> bool;
        fn stack_definition(&self, id: &StackId) -> Option<StackDefinition>;
    }
}
