//! Stack registries implementing [`StackMetadataProvider`].
//!
//! [`StackMetadataProvider`]: rampart_core::application::ports::StackMetadataProvider

pub mod memory;

pub use memory::InMemoryStackRegistry;
