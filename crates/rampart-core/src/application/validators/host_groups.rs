//! Structural check on host groups. Needs no stack metadata.

use crate::{
    application::validators::{TopologyValidator, ValidationRule, join_sorted},
    domain::ClusterTopology,
    error::{RampartError, RampartResult},
};

/// Verifies that the request declares at least one host group and that no
/// host group is empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectEmptyHostGroups;

impl TopologyValidator for RejectEmptyHostGroups {
    fn name(&self) -> &'static str {
        ValidationRule::EmptyHostGroups.as_str()
    }

    fn validate(&self, topology: ClusterTopology) -> RampartResult<ClusterTopology> {
        if topology.host_groups().is_empty() {
            return Err(RampartError::invalid_topology(
                "Cluster creation request has no host groups",
            ));
        }

        let empty: Vec<&str> = topology
            .host_groups()
            .values()
            .filter(|g| g.components.is_empty())
            .map(|g| g.name.as_str())
            .collect();

        if !empty.is_empty() {
            return Err(RampartError::invalid_topology(format!(
                "Host groups without components: {}",
                join_sorted(empty)
            )));
        }

        Ok(topology)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HostGroup;

    #[test]
    fn rejects_topology_without_host_groups() {
        let input = ClusterTopology::builder().cluster_name("c1").build().unwrap();
        let err = RejectEmptyHostGroups.validate(input).unwrap_err();
        assert_eq!(err.to_string(), "Cluster creation request has no host groups");
    }

    #[test]
    fn lists_every_empty_group() {
        let input = ClusterTopology::builder()
            .cluster_name("c1")
            .host_group(HostGroup::new("workers"))
            .host_group(HostGroup::new("master").with_component("NAMENODE"))
            .host_group(HostGroup::new("edge").with_host("edge1.example.com"))
            .build()
            .unwrap();

        let err = RejectEmptyHostGroups.validate(input).unwrap_err();
        assert_eq!(err.to_string(), "Host groups without components: edge, workers");
    }

    #[test]
    fn populated_groups_pass() {
        let input = ClusterTopology::builder()
            .cluster_name("c1")
            .host_group(HostGroup::new("master").with_component("NAMENODE"))
            .build()
            .unwrap();

        assert_eq!(RejectEmptyHostGroups.validate(input.clone()).unwrap(), input);
    }
}
