//! Rejects topologies that reference stacks the registry does not know.

use crate::{
    application::{
        ports::MetadataHandle,
        validators::{TopologyValidator, ValidationRule, join_sorted},
    },
    domain::{ClusterTopology, StackId},
    error::{RampartError, RampartResult},
};

/// Verifies that the topology only references known stacks.
///
/// The metadata provider is resolved on each call, so the validator can be
/// constructed before stack metadata is loaded.
#[derive(Debug, Clone)]
pub struct RejectUnknownStacks {
    metadata: MetadataHandle,
}

impl RejectUnknownStacks {
    pub fn new(metadata: MetadataHandle) -> Self {
        Self { metadata }
    }
}

impl TopologyValidator for RejectUnknownStacks {
    fn name(&self) -> &'static str {
        ValidationRule::UnknownStacks.as_str()
    }

    fn validate(&self, topology: ClusterTopology) -> RampartResult<ClusterTopology> {
        if topology.stack_ids().is_empty() {
            return Ok(topology);
        }

        let metadata = self.metadata.resolve_or_reject()?;

        // `stack_ids` is a sorted set: no duplicates, canonical order.
        let unknown: Vec<&StackId> = topology
            .stack_ids()
            .iter()
            .filter(|id| !metadata.is_known_stack(id))
            .collect();

        if !unknown.is_empty() {
            return Err(RampartError::invalid_topology(format!(
                "Unknown stacks found in cluster creation request: {}",
                join_sorted(unknown)
            )));
        }

        Ok(topology)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;
    use crate::application::ports::{MetadataSlot, StackMetadataProvider, output::MockStackMetadataProvider};

    fn known(ids: &[&str]) -> MetadataHandle {
        let known: HashSet<StackId> = ids.iter().map(|s| StackId::parse(s).unwrap()).collect();
        let mut mock = MockStackMetadataProvider::new();
        mock.expect_is_known_stack()
            .returning(move |id| known.contains(id));
        MetadataHandle::ready(Arc::new(mock))
    }

    fn topology(stacks: &[&str]) -> ClusterTopology {
        ClusterTopology::builder()
            .cluster_name("c1")
            .stacks(stacks.iter().map(|s| StackId::parse(s).unwrap()))
            .build()
            .unwrap()
    }

    #[test]
    fn known_stacks_pass_unchanged() {
        let validator = RejectUnknownStacks::new(known(&["HDP-2.6", "HDP-3.1"]));
        let input = topology(&["HDP-3.1", "HDP-2.6"]);

        assert_eq!(validator.validate(input.clone()).unwrap(), input);
    }

    #[test]
    fn reports_single_unknown_stack() {
        let validator = RejectUnknownStacks::new(known(&["HDP-2.6", "HDP-3.1"]));
        let err = validator
            .validate(topology(&["HDP-3.1", "BIGTOP-1.0"]))
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Unknown stacks found in cluster creation request: BIGTOP-1.0"
        );
    }

    #[test]
    fn reports_all_unknown_stacks_sorted() {
        let validator = RejectUnknownStacks::new(known(&["HDP-2.6"]));
        let err = validator
            .validate(topology(&["X-1.0", "A-1.0"]))
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Unknown stacks found in cluster creation request: A-1.0, X-1.0"
        );
    }

    #[test]
    fn duplicates_are_reported_once() {
        let validator = RejectUnknownStacks::new(known(&[]));
        let err = validator
            .validate(topology(&["Z-1.0", "Z-1.0", "B-2.0", "Z-1.0"]))
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Unknown stacks found in cluster creation request: B-2.0, Z-1.0"
        );
    }

    #[test]
    fn dashed_names_report_in_string_order() {
        let validator = RejectUnknownStacks::new(known(&[]));
        let err = validator.validate(topology(&["A-2", "A-1-0"])).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Unknown stacks found in cluster creation request: A-1-0, A-2"
        );
    }

    #[test]
    fn empty_stack_set_passes_without_metadata() {
        let validator = RejectUnknownStacks::new(MetadataHandle::unavailable());
        let input = topology(&[]);

        assert_eq!(validator.validate(input.clone()).unwrap(), input);
    }

    #[test]
    fn validation_is_idempotent() {
        let validator = RejectUnknownStacks::new(known(&["HDP-2.6"]));
        let input = topology(&["HDP-2.6"]);

        let once = validator.validate(input.clone()).unwrap();
        let twice = validator.validate(once.clone()).unwrap();
        assert_eq!(once, input);
        assert_eq!(twice, input);
    }

    #[test]
    fn provider_installed_after_construction_is_used() {
        let slot = MetadataSlot::new();
        let validator = RejectUnknownStacks::new(slot.handle());

        let mut mock = MockStackMetadataProvider::new();
        mock.expect_is_known_stack().return_const(true);
        let provider: Arc<dyn StackMetadataProvider> = Arc::new(mock);
        slot.install(provider).unwrap();

        assert!(validator.validate(topology(&["HDP-3.1"])).is_ok());
    }

    #[test]
    fn missing_provider_fails_closed() {
        let validator = RejectUnknownStacks::new(MetadataSlot::new().handle());
        let err = validator.validate(topology(&["HDP-3.1"])).unwrap_err();

        assert!(err.is_topology_rejection());
        assert!(err.to_string().starts_with("Stack metadata unavailable"));
    }
}
