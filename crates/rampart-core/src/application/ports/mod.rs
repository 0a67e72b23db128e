//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `rampart-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `StackMetadataProvider`: Stack registration and capability lookups
//!
//! - **Deferred access**: `MetadataHandle` / `MetadataSlot` let validators be
//!   constructed before the provider exists

pub mod deferred;
pub mod output;

pub use deferred::{MetadataHandle, MetadataSlot};
pub use output::StackMetadataProvider;
