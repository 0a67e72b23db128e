//! Validation Service - the entry point the provisioning pipeline calls.
//!
//! This service runs one cluster creation request through the configured
//! validator chain:
//! 1. Log the request
//! 2. Thread the topology through the chain
//! 3. Return the validated topology together with what ran
//!
//! A rejection is a request error. It is returned as-is and never retried.

use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::validators::ValidatorChain,
    domain::ClusterTopology,
    error::RampartResult,
};

/// Result of a successful validation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    /// The topology as returned by the last validator.
    pub topology: ClusterTopology,
    /// Names of the validators that ran, in order.
    pub validators: Vec<&'static str>,
    pub validated_at: DateTime<Utc>,
}

impl ValidationOutcome {
    pub fn request_id(&self) -> Uuid {
        self.topology.request_id()
    }

    /// `true` if any validator annotated the topology.
    pub fn was_annotated(&self) -> bool {
        !self.topology.annotations().is_empty()
    }
}

/// Validation entry point.
///
/// Holds a long-lived chain; safe to share across threads and requests.
#[derive(Debug, Clone)]
pub struct ValidationService {
    chain: ValidatorChain,
}

impl ValidationService {
    /// Create a validation service around a chain.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use rampart_core::application::{MetadataSlot, ValidationService, ValidatorChain};
    ///
    /// let slot = MetadataSlot::new();
    /// let service = ValidationService::new(ValidatorChain::standard(slot.handle()));
    /// ```
    pub fn new(chain: ValidatorChain) -> Self {
        Self { chain }
    }

    pub fn chain(&self) -> &ValidatorChain {
        &self.chain
    }

    /// Validate a cluster creation request.
    #[instrument(
        skip_all,
        fields(
            request_id = %topology.request_id(),
            cluster = %topology.cluster_name()
        )
    )]
    pub fn validate(&self, topology: ClusterTopology) -> RampartResult<ValidationOutcome> {
        info!(
            stacks = topology.stack_ids().len(),
            host_groups = topology.host_groups().len(),
            "Validating cluster creation request"
        );

        match self.chain.run(topology) {
            Ok(topology) => {
                info!(
                    annotations = topology.annotations().len(),
                    "Cluster creation request passed validation"
                );
                Ok(ValidationOutcome {
                    topology,
                    validators: self.chain.names(),
                    validated_at: Utc::now(),
                })
            }
            Err(e) => {
                warn!(error = %e, "Cluster creation request rejected");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::application::ports::{MetadataSlot, output::MockStackMetadataProvider};
    use crate::domain::{HostGroup, StackDefinition, StackId};

    fn installed_slot() -> MetadataSlot {
        let def = StackDefinition::new(StackId::new("HDP", "3.1"))
            .with_components(["NAMENODE", "DATANODE"])
            .with_config_types(["core-site"])
            .with_password("hive-env", "hive_metastore_user_passwd");
        let known = def.id.clone();

        let mut mock = MockStackMetadataProvider::new();
        mock.expect_is_known_stack()
            .returning(move |id| id == &known);
        mock.expect_stack_definition()
            .returning(move |id| (id == &def.id).then(|| def.clone()));

        let slot = MetadataSlot::new();
        slot.install(Arc::new(mock)).unwrap();
        slot
    }

    fn request() -> crate::domain::TopologyBuilder<crate::domain::HasName> {
        ClusterTopology::builder()
            .cluster_name("analytics")
            .stack(StackId::new("HDP", "3.1"))
            .host_group(HostGroup::new("master").with_component("NAMENODE"))
            .host_group(HostGroup::new("worker").with_component("DATANODE"))
    }

    #[test]
    fn valid_request_reports_what_ran() {
        let service = ValidationService::new(ValidatorChain::standard(installed_slot().handle()));
        let input = request().build().unwrap();

        let outcome = service.validate(input.clone()).unwrap();
        assert_eq!(outcome.topology, input);
        assert_eq!(outcome.request_id(), input.request_id());
        assert_eq!(outcome.validators.len(), 5);
        assert!(!outcome.was_annotated());
    }

    #[test]
    fn unknown_stack_is_rejected_before_component_check() {
        let service = ValidationService::new(ValidatorChain::standard(installed_slot().handle()));
        let input = request()
            .stack(StackId::new("BIGTOP", "1.0"))
            .host_group(HostGroup::new("edge").with_component("SPARK_CLIENT"))
            .build()
            .unwrap();

        let err = service.validate(input).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown stacks found in cluster creation request: BIGTOP-1.0"
        );
    }

    #[test]
    fn default_password_annotation_reaches_caller() {
        let service = ValidationService::new(ValidatorChain::standard(installed_slot().handle()));
        let input = request()
            .property("hive-env", "hive_user", "hive")
            .default_password("changeme")
            .build()
            .unwrap();

        let outcome = service.validate(input).unwrap();
        assert!(outcome.was_annotated());
        assert_eq!(
            outcome
                .topology
                .configuration()
                .get("hive-env", "hive_metastore_user_passwd"),
            Some("changeme")
        );
    }
}
