pub mod stack;
pub mod topology;

pub use crate::domain::DomainError;
pub use stack::StackDefinition;
pub use topology::{ClusterTopology, Configuration, HostGroup, TopologyBuilder};
