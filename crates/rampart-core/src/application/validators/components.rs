//! Rejects host group components that none of the referenced stacks offer.

use std::collections::BTreeSet;

use crate::{
    application::{
        ports::MetadataHandle,
        validators::{TopologyValidator, ValidationRule, join_sorted},
    },
    domain::ClusterTopology,
    error::{RampartError, RampartResult},
};

/// Verifies that every component placed in a host group is offered by at
/// least one of the topology's stacks.
///
/// Violations are reported as `host_group/COMPONENT`. Stacks the provider
/// does not know contribute no components; they are reported by
/// [`super::RejectUnknownStacks`], which runs earlier in the standard chain.
#[derive(Debug, Clone)]
pub struct RejectUnknownComponents {
    metadata: MetadataHandle,
}

impl RejectUnknownComponents {
    pub fn new(metadata: MetadataHandle) -> Self {
        Self { metadata }
    }
}

impl TopologyValidator for RejectUnknownComponents {
    fn name(&self) -> &'static str {
        ValidationRule::UnknownComponents.as_str()
    }

    fn validate(&self, topology: ClusterTopology) -> RampartResult<ClusterTopology> {
        if topology.components().is_empty() {
            return Ok(topology);
        }

        let metadata = self.metadata.resolve_or_reject()?;

        let offered: BTreeSet<String> = topology
            .stack_ids()
            .iter()
            .filter_map(|id| metadata.stack_definition(id))
            .flat_map(|def| def.components)
            .collect();

        // Host groups iterate in name order, components within a group too.
        let unknown: Vec<String> = topology
            .host_groups()
            .values()
            .flat_map(|group| {
                group
                    .components
                    .iter()
                    .filter(|c| !offered.contains(*c))
                    .map(move |c| format!("{}/{}", group.name, c))
            })
            .collect();

        if !unknown.is_empty() {
            return Err(RampartError::invalid_topology(format!(
                "Unknown components found in cluster creation request: {}",
                join_sorted(unknown)
            )));
        }

        Ok(topology)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::application::ports::output::MockStackMetadataProvider;
    use crate::domain::{HostGroup, StackDefinition, StackId};

    fn hdp31() -> StackDefinition {
        StackDefinition::new(StackId::new("HDP", "3.1"))
            .with_components(["NAMENODE", "DATANODE", "ZOOKEEPER_SERVER"])
    }

    fn handle_with(defs: Vec<StackDefinition>) -> MetadataHandle {
        let mut mock = MockStackMetadataProvider::new();
        mock.expect_stack_definition()
            .returning(move |id| defs.iter().find(|d| &d.id == id).cloned());
        MetadataHandle::ready(Arc::new(mock))
    }

    fn topology(groups: Vec<HostGroup>) -> ClusterTopology {
        groups
            .into_iter()
            .fold(
                ClusterTopology::builder()
                    .cluster_name("c1")
                    .stack(StackId::new("HDP", "3.1")),
                |b, g| b.host_group(g),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn offered_components_pass() {
        let validator = RejectUnknownComponents::new(handle_with(vec![hdp31()]));
        let input = topology(vec![
            HostGroup::new("master").with_component("NAMENODE"),
            HostGroup::new("worker").with_component("DATANODE"),
        ]);

        assert_eq!(validator.validate(input.clone()).unwrap(), input);
    }

    #[test]
    fn reports_every_unknown_component_by_group() {
        let validator = RejectUnknownComponents::new(handle_with(vec![hdp31()]));
        let input = topology(vec![
            HostGroup::new("worker")
                .with_component("DATANODE")
                .with_component("SPARK_WORKER"),
            HostGroup::new("master")
                .with_component("NAMENODE")
                .with_component("HBASE_MASTER"),
        ]);

        let err = validator.validate(input).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown components found in cluster creation request: \
             master/HBASE_MASTER, worker/SPARK_WORKER"
        );
    }

    #[test]
    fn unknown_stack_offers_nothing() {
        let validator = RejectUnknownComponents::new(handle_with(vec![]));
        let input = topology(vec![HostGroup::new("master").with_component("NAMENODE")]);

        assert!(validator.validate(input).unwrap_err().is_topology_rejection());
    }

    #[test]
    fn topology_without_components_skips_lookup() {
        let validator = RejectUnknownComponents::new(MetadataHandle::unavailable());
        let input = topology(vec![HostGroup::new("empty")]);

        assert!(validator.validate(input).is_ok());
    }
}
