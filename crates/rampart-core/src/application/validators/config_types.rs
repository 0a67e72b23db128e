//! Rejects configuration types that none of the referenced stacks declare.

use std::collections::BTreeSet;

use crate::{
    application::{
        ports::MetadataHandle,
        validators::{TopologyValidator, ValidationRule, join_sorted},
    },
    domain::ClusterTopology,
    error::{RampartError, RampartResult},
};

/// Verifies that the cluster configuration only uses config types declared
/// by the topology's stacks.
#[derive(Debug, Clone)]
pub struct RejectUnknownConfigTypes {
    metadata: MetadataHandle,
}

impl RejectUnknownConfigTypes {
    pub fn new(metadata: MetadataHandle) -> Self {
        Self { metadata }
    }
}

impl TopologyValidator for RejectUnknownConfigTypes {
    fn name(&self) -> &'static str {
        ValidationRule::UnknownConfigTypes.as_str()
    }

    fn validate(&self, topology: ClusterTopology) -> RampartResult<ClusterTopology> {
        if topology.configuration().is_empty() {
            return Ok(topology);
        }

        let metadata = self.metadata.resolve_or_reject()?;

        let declared: BTreeSet<String> = topology
            .stack_ids()
            .iter()
            .filter_map(|id| metadata.stack_definition(id))
            .flat_map(|def| def.config_types)
            .collect();

        let unknown: Vec<&str> = topology
            .configuration()
            .config_types()
            .filter(|t| !declared.contains(*t))
            .collect();

        if !unknown.is_empty() {
            return Err(RampartError::invalid_topology(format!(
                "Unknown configuration types found in cluster creation request: {}",
                join_sorted(unknown)
            )));
        }

        Ok(topology)
    }
}
