//! Infrastructure adapters for Rampart.
//!
//! This crate implements the ports defined in `rampart-core::application::ports`.
//! It contains all external dependencies and I/O operations: stack registries,
//! the on-disk stack catalog, and the cluster request loader.

pub mod builtin_stacks;
pub mod registry;
pub mod request_loader;
pub mod stack_catalog;

// Re-export commonly used adapters
pub use registry::InMemoryStackRegistry;
pub use request_loader::{ClusterRequest, RequestLoader};
pub use stack_catalog::{StackCatalogLoader, StackManifest};
