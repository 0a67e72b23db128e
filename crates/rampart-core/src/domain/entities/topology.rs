//! The `ClusterTopology` aggregate root and its typestate builder.
//!
//! A `ClusterTopology` is the requested layout of a cluster being created:
//! the stacks it is built from, its host groups, and its configuration. It is
//! produced upstream, threaded through the validator chain, and handed to
//! provisioning (or discarded) afterwards.
//!
//! Validators treat a topology as immutable input. An annotating validator
//! builds an updated copy through `with_*` methods and returns it, so every
//! change is visible in the value the next validator receives.
//!
//! # Domain purity
//!
//! This module must not import `tracing`. Observability is the responsibility
//! of the application and CLI layers, not the domain.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    error::DomainError,
    value_objects::{PropertyRef, StackId},
};

// ── Aggregate root ────────────────────────────────────────────────────────────

/// A requested cluster layout, the unit of validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterTopology {
    request_id: Uuid,
    cluster_name: String,
    stack_ids: BTreeSet<StackId>,
    host_groups: BTreeMap<String, HostGroup>,
    configuration: Configuration,
    default_password: Option<String>,
    annotations: BTreeMap<String, String>,
}

impl ClusterTopology {
    /// Start building a new `ClusterTopology`.
    pub fn builder() -> TopologyBuilder<NoName> {
        TopologyBuilder::new()
    }

    pub const fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn cluster_name(&self) -> &str {
        &self.cluster_name
    }

    /// Every stack referenced anywhere in the request, deduplicated and
    /// in sorted order.
    pub const fn stack_ids(&self) -> &BTreeSet<StackId> {
        &self.stack_ids
    }

    pub const fn host_groups(&self) -> &BTreeMap<String, HostGroup> {
        &self.host_groups
    }

    pub fn host_group(&self, name: &str) -> Option<&HostGroup> {
        self.host_groups.get(name)
    }

    pub const fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn default_password(&self) -> Option<&str> {
        self.default_password.as_deref()
    }

    pub const fn annotations(&self) -> &BTreeMap<String, String> {
        &self.annotations
    }

    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.annotations.get(key).map(String::as_str)
    }

    /// Return this topology with its configuration replaced.
    #[must_use]
    pub fn with_configuration(mut self, configuration: Configuration) -> Self {
        self.configuration = configuration;
        self
    }

    /// Return this topology with an annotation added (or overwritten).
    #[must_use]
    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }

    /// All component names across every host group, deduplicated.
    pub fn components(&self) -> BTreeSet<&str> {
        self.host_groups
            .values()
            .flat_map(|g| g.components.iter().map(String::as_str))
            .collect()
    }
}

impl fmt::Display for ClusterTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} stacks, {} host groups)",
            self.cluster_name,
            self.stack_ids.len(),
            self.host_groups.len()
        )
    }
}

// ── HostGroup ─────────────────────────────────────────────────────────────────

/// A named set of hosts that all run the same components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostGroup {
    pub name: String,
    pub components: BTreeSet<String>,
    pub hosts: BTreeSet<String>,
}

impl HostGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            components: BTreeSet::new(),
            hosts: BTreeSet::new(),
        }
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.components.insert(component.into());
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.hosts.insert(host.into());
        self
    }

    pub fn has_component(&self, component: &str) -> bool {
        self.components.contains(component)
    }

    fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidHostGroup {
                name: self.name.clone(),
                reason: "name cannot be empty".into(),
            });
        }
        if self.components.iter().any(|c| c.trim().is_empty()) {
            return Err(DomainError::InvalidHostGroup {
                name: self.name.clone(),
                reason: "component names cannot be empty".into(),
            });
        }
        Ok(())
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

/// Cluster configuration: `config type -> property -> value`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration {
    properties: BTreeMap<String, BTreeMap<String, String>>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, config_type: &str, name: &str) -> Option<&str> {
        self.properties
            .get(config_type)
            .and_then(|props| props.get(name))
            .map(String::as_str)
    }

    pub fn set(
        &mut self,
        config_type: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.properties
            .entry(config_type.into())
            .or_default()
            .insert(name.into(), value.into());
    }

    pub fn with(
        mut self,
        config_type: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.set(config_type, name, value);
        self
    }

    /// `true` if the property is present with a non-empty value.
    pub fn contains(&self, property: &PropertyRef) -> bool {
        self.get(&property.config_type, &property.name)
            .is_some_and(|v| !v.is_empty())
    }

    pub fn config_types(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    pub fn has_config_type(&self, config_type: &str) -> bool {
        self.properties.contains_key(config_type)
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

// ── Typestate markers ─────────────────────────────────────────────────────────

/// Marker: cluster name has not yet been set.
pub struct NoName;
/// Marker: cluster name has been set; the topology can be built.
pub struct HasName;

// ── Builder ───────────────────────────────────────────────────────────────────

/// Typestate builder for [`ClusterTopology`].
///
/// Compile-time guarantee: `build()` is only reachable after a cluster name
/// has been set.
pub struct TopologyBuilder<N> {
    request_id: Option<Uuid>,
    cluster_name: Option<String>,
    stack_ids: BTreeSet<StackId>,
    host_groups: Vec<HostGroup>,
    configuration: Configuration,
    default_password: Option<String>,
    _marker: PhantomData<N>,
}

impl TopologyBuilder<NoName> {
    pub fn new() -> Self {
        Self {
            request_id: None,
            cluster_name: None,
            stack_ids: BTreeSet::new(),
            host_groups: Vec::new(),
            configuration: Configuration::new(),
            default_password: None,
            _marker: PhantomData,
        }
    }

    /// Set the cluster name. This transitions the builder to `HasName`.
    pub fn cluster_name(self, name: impl Into<String>) -> TopologyBuilder<HasName> {
        TopologyBuilder {
            request_id: self.request_id,
            cluster_name: Some(name.into()),
            stack_ids: self.stack_ids,
            host_groups: self.host_groups,
            configuration: self.configuration,
            default_password: self.default_password,
            _marker: PhantomData,
        }
    }
}

impl Default for TopologyBuilder<NoName> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> TopologyBuilder<N> {
    /// Use a caller-supplied request id instead of a fresh one.
    pub fn request_id(mut self, id: Uuid) -> Self {
        self.request_id = Some(id);
        self
    }

    /// Reference a stack. Repeated ids collapse into one.
    pub fn stack(mut self, id: StackId) -> Self {
        self.stack_ids.insert(id);
        self
    }

    pub fn stacks(mut self, ids: impl IntoIterator<Item = StackId>) -> Self {
        self.stack_ids.extend(ids);
        self
    }

    pub fn host_group(mut self, group: HostGroup) -> Self {
        self.host_groups.push(group);
        self
    }

    pub fn configuration(mut self, configuration: Configuration) -> Self {
        self.configuration = configuration;
        self
    }

    pub fn property(
        mut self,
        config_type: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.configuration.set(config_type, name, value);
        self
    }

    pub fn default_password(mut self, password: impl Into<String>) -> Self {
        self.default_password = Some(password.into());
        self
    }
}

impl TopologyBuilder<HasName> {
    /// Build the topology.
    ///
    /// Rejects an empty cluster name, malformed host groups, and host group
    /// names declared more than once.
    pub fn build(self) -> Result<ClusterTopology, DomainError> {
        let cluster_name = self
            .cluster_name
            .filter(|n| !n.trim().is_empty())
            .ok_or(DomainError::MissingRequiredField {
                field: "cluster_name",
            })?;

        let mut host_groups = BTreeMap::new();
        for group in self.host_groups {
            group.validate()?;
            if host_groups.contains_key(&group.name) {
                return Err(DomainError::InvalidHostGroup {
                    name: group.name,
                    reason: "declared more than once".into(),
                });
            }
            host_groups.insert(group.name.clone(), group);
        }

        Ok(ClusterTopology {
            request_id: self.request_id.unwrap_or_else(Uuid::new_v4),
            cluster_name,
            stack_ids: self.stack_ids,
            host_groups,
            configuration: self.configuration,
            default_password: self.default_password.filter(|p| !p.is_empty()),
            annotations: BTreeMap::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(s: &str) -> StackId {
        StackId::parse(s).unwrap()
    }

    #[test]
    fn builder_dedups_stack_ids() {
        let topology = ClusterTopology::builder()
            .cluster_name("c1")
            .stack(stack("HDP-3.1"))
            .stack(stack("HDP-3.1"))
            .stack(stack("HDP-2.6"))
            .build()
            .unwrap();

        let ids: Vec<String> = topology.stack_ids().iter().map(|s| s.to_string()).collect();
        assert_eq!(ids, ["HDP-2.6", "HDP-3.1"]);
    }

    #[test]
    fn builder_rejects_blank_cluster_name() {
        let result = ClusterTopology::builder().cluster_name("  ").build();
        assert_eq!(
            result.unwrap_err(),
            DomainError::MissingRequiredField {
                field: "cluster_name"
            }
        );
    }

    #[test]
    fn builder_rejects_duplicate_host_groups() {
        let result = ClusterTopology::builder()
            .cluster_name("c1")
            .host_group(HostGroup::new("master"))
            .host_group(HostGroup::new("master"))
            .build();

        assert!(matches!(
            result,
            Err(DomainError::InvalidHostGroup { ref name, .. }) if name == "master"
        ));
    }

    #[test]
    fn builder_keeps_request_id() {
        let id = Uuid::new_v4();
        let topology = ClusterTopology::builder()
            .request_id(id)
            .cluster_name("c1")
            .build()
            .unwrap();
        assert_eq!(topology.request_id(), id);
    }

    #[test]
    fn empty_default_password_is_dropped() {
        let topology = ClusterTopology::builder()
            .cluster_name("c1")
            .default_password("")
            .build()
            .unwrap();
        assert_eq!(topology.default_password(), None);
    }

    #[test]
    fn with_annotation_returns_updated_copy() {
        let original = ClusterTopology::builder().cluster_name("c1").build().unwrap();
        let annotated = original.clone().with_annotation("checked", "yes");

        assert_eq!(original.annotation("checked"), None);
        assert_eq!(annotated.annotation("checked"), Some("yes"));
        assert_ne!(original, annotated);
    }

    #[test]
    fn components_span_all_host_groups() {
        let topology = ClusterTopology::builder()
            .cluster_name("c1")
            .host_group(HostGroup::new("a").with_component("NAMENODE"))
            .host_group(
                HostGroup::new("b")
                    .with_component("DATANODE")
                    .with_component("NAMENODE"),
            )
            .build()
            .unwrap();

        assert_eq!(
            topology.components().into_iter().collect::<Vec<_>>(),
            ["DATANODE", "NAMENODE"]
        );
    }

    #[test]
    fn configuration_contains_ignores_empty_values() {
        let config = Configuration::new()
            .with("hive-env", "hive_password", "")
            .with("core-site", "fs.defaultFS", "hdfs://nn");

        assert!(!config.contains(&PropertyRef::new("hive-env", "hive_password")));
        assert!(config.contains(&PropertyRef::new("core-site", "fs.defaultFS")));
        assert_eq!(config.config_types().collect::<Vec<_>>(), ["core-site", "hive-env"]);
    }
}
