//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "validate a cluster creation request".

pub mod validation_service;

pub use validation_service::{ValidationOutcome, ValidationService};
