//! Rampart Core - Topology Validation Gate
//!
//! This crate provides the domain and application layers for Rampart, the
//! pre-provisioning validation stage of a cluster-topology orchestrator,
//! following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           rampart-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ValidationService, ValidatorChain)    │
//! │     Threads a topology through rules    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  (Driven: StackMetadataProvider)        │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    rampart-adapters (Infrastructure)    │
//! │ (InMemoryStackRegistry, loaders, etc)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ClusterTopology, StackId, HostGroup)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rampart_core::{
//!     application::{MetadataSlot, ValidationService, ValidatorChain},
//!     domain::{ClusterTopology, StackId},
//! };
//! # use std::sync::Arc;
//! # use rampart_core::{application::StackMetadataProvider, domain::StackDefinition};
//! # struct Registry;
//! # impl StackMetadataProvider for Registry {
//! #     fn is_known_stack(&self, _: &StackId) -> bool { true }
//! #     fn stack_definition(&self, _: &StackId) -> Option<StackDefinition> { None }
//! # }
//! # let registry = Arc::new(Registry);
//!
//! // 1. Wire the chain before stack metadata is loaded
//! let slot = MetadataSlot::new();
//! let service = ValidationService::new(ValidatorChain::standard(slot.handle()));
//!
//! // 2. Later, once metadata is available
//! slot.install(registry).unwrap();
//!
//! // 3. Validate a request
//! let topology = ClusterTopology::builder()
//!     .cluster_name("analytics")
//!     .stack(StackId::new("HDP", "3.1"))
//!     .build()
//!     .unwrap();
//! let outcome = service.validate(topology).unwrap();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        MetadataHandle, MetadataSlot, TopologyValidator, ValidationOutcome, ValidationRule,
        ValidationService, ValidatorChain, ports::StackMetadataProvider,
    };
    pub use crate::domain::{
        ClusterTopology, Configuration, HostGroup, PropertyRef, StackDefinition, StackId,
    };
    pub use crate::error::{RampartError, RampartResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
