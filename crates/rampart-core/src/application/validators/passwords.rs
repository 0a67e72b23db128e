//! Checks that required password properties are set.
//!
//! This is the one built-in rule that may change the topology: when the
//! request carries a default password, missing password properties are
//! filled with it and the returned topology records which ones were filled.

use std::collections::BTreeSet;

use crate::{
    application::{
        ports::MetadataHandle,
        validators::{TopologyValidator, ValidationRule, join_sorted},
    },
    domain::{ClusterTopology, PropertyRef},
    error::{RampartError, RampartResult},
};

/// Annotation key listing the properties filled from the default password.
pub const DEFAULTED_PASSWORDS: &str = "defaulted-passwords";

/// Verifies that every password property declared by the topology's stacks
/// is set, for each config type the configuration uses.
#[derive(Debug, Clone)]
pub struct RequiredPasswordValidator {
    metadata: MetadataHandle,
}

impl RequiredPasswordValidator {
    pub fn new(metadata: MetadataHandle) -> Self {
        Self { metadata }
    }
}

impl TopologyValidator for RequiredPasswordValidator {
    fn name(&self) -> &'static str {
        ValidationRule::RequiredPasswords.as_str()
    }

    fn validate(&self, topology: ClusterTopology) -> RampartResult<ClusterTopology> {
        if topology.configuration().is_empty() {
            return Ok(topology);
        }

        let metadata = self.metadata.resolve_or_reject()?;

        let missing: BTreeSet<PropertyRef> = topology
            .stack_ids()
            .iter()
            .filter_map(|id| metadata.stack_definition(id))
            .flat_map(|def| def.password_properties)
            .filter(|p| topology.configuration().has_config_type(&p.config_type))
            .filter(|p| !topology.configuration().contains(p))
            .collect();

        if missing.is_empty() {
            return Ok(topology);
        }

        let Some(default_password) = topology.default_password().map(str::to_owned) else {
            return Err(RampartError::invalid_topology(format!(
                "Missing required password properties: {}",
                join_sorted(&missing)
            )));
        };

        let mut configuration = topology.configuration().clone();
        for property in &missing {
            configuration.set(&property.config_type, &property.name, default_password.as_str());
        }

        Ok(topology
            .with_configuration(configuration)
            .with_annotation(DEFAULTED_PASSWORDS, join_sorted(&missing)))
    }
}
