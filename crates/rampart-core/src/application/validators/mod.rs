//! Topology validators and the chain that composes them.
//!
//! Every rule implements [`TopologyValidator`]: it takes the current topology
//! by value and either returns the topology the next stage should see, or
//! rejects the request with a complete description of what this rule found
//! wrong. [`ValidatorChain`] folds a topology through an ordered list of
//! validators and stops at the first rejection.
//!
//! ## Adding a rule
//!
//! 1. Implement `TopologyValidator` in a new module here
//! 2. Add a [`ValidationRule`] variant, its name, and its `instantiate` arm
//! 3. Decide where it belongs in [`ValidationRule::STANDARD_ORDER`]

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::{
    application::{ApplicationError, ports::MetadataHandle},
    domain::ClusterTopology,
    error::{RampartError, RampartResult},
};

pub mod chain;
pub mod components;
pub mod config_types;
pub mod host_groups;
pub mod passwords;
pub mod stacks;

pub use chain::{ValidatorChain, ValidatorChainBuilder};
pub use components::RejectUnknownComponents;
pub use config_types::RejectUnknownConfigTypes;
pub use host_groups::RejectEmptyHostGroups;
pub use passwords::RequiredPasswordValidator;
pub use stacks::RejectUnknownStacks;

/// A single rule-check unit.
///
/// Contract:
/// - On success, return the topology downstream validators and the caller
///   must treat as current (the input unchanged, or an annotated copy).
/// - On failure, return an error describing every violation of this rule,
///   in sorted order.
/// - Never reject a valid topology, never write to shared state.
pub trait TopologyValidator: Send + Sync {
    /// Stable name used in logs and reports.
    fn name(&self) -> &'static str;

    fn validate(&self, topology: ClusterTopology) -> RampartResult<ClusterTopology>;
}

impl<V: TopologyValidator + ?Sized> TopologyValidator for Arc<V> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn validate(&self, topology: ClusterTopology) -> RampartResult<ClusterTopology> {
        (**self).validate(topology)
    }
}

/// Adapts a closure into a named validator.
pub struct FnValidator<F> {
    name: &'static str,
    check: F,
}

impl<F> FnValidator<F>
where
    F: Fn(ClusterTopology) -> RampartResult<ClusterTopology> + Send + Sync,
{
    pub fn new(name: &'static str, check: F) -> Self {
        Self { name, check }
    }
}

impl<F> TopologyValidator for FnValidator<F>
where
    F: Fn(ClusterTopology) -> RampartResult<ClusterTopology> + Send + Sync,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn validate(&self, topology: ClusterTopology) -> RampartResult<ClusterTopology> {
        (self.check)(topology)
    }
}

/// Join already-sorted items into the `a, b, c` form used by every rule.
pub(crate) fn join_sorted<I, T>(items: I) -> String
where
    I: IntoIterator<Item = T>,
    T: fmt::Display,
{
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// ── Built-in rules ────────────────────────────────────────────────────────────

/// Names every built-in validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationRule {
    EmptyHostGroups,
    UnknownStacks,
    UnknownComponents,
    UnknownConfigTypes,
    RequiredPasswords,
}

impl ValidationRule {
    /// Order used when the caller does not pick one. Structural checks come
    /// first, then stacks, since the component and configuration checks only
    /// mean something once every stack is known.
    pub const STANDARD_ORDER: [ValidationRule; 5] = [
        Self::EmptyHostGroups,
        Self::UnknownStacks,
        Self::UnknownComponents,
        Self::UnknownConfigTypes,
        Self::RequiredPasswords,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyHostGroups => "empty-host-groups",
            Self::UnknownStacks => "unknown-stacks",
            Self::UnknownComponents => "unknown-components",
            Self::UnknownConfigTypes => "unknown-config-types",
            Self::RequiredPasswords => "required-passwords",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::EmptyHostGroups => "Request declares host groups and none of them is empty",
            Self::UnknownStacks => "Every referenced stack is registered",
            Self::UnknownComponents => "Every component is offered by a referenced stack",
            Self::UnknownConfigTypes => "Every configuration type is declared by a referenced stack",
            Self::RequiredPasswords => {
                "Required password properties are set (filled from the default password if given)"
            }
        }
    }

    /// Whether the rule consults the stack metadata provider.
    pub const fn uses_metadata(&self) -> bool {
        !matches!(self, Self::EmptyHostGroups)
    }

    /// Build the validator for this rule.
    pub fn instantiate(&self, metadata: &MetadataHandle) -> Arc<dyn TopologyValidator> {
        match self {
            Self::EmptyHostGroups => Arc::new(RejectEmptyHostGroups),
            Self::UnknownStacks => Arc::new(RejectUnknownStacks::new(metadata.clone())),
            Self::UnknownComponents => Arc::new(RejectUnknownComponents::new(metadata.clone())),
            Self::UnknownConfigTypes => Arc::new(RejectUnknownConfigTypes::new(metadata.clone())),
            Self::RequiredPasswords => Arc::new(RequiredPasswordValidator::new(metadata.clone())),
        }
    }
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationRule {
    type Err = RampartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "empty-host-groups" | "host-groups" => Ok(Self::EmptyHostGroups),
            "unknown-stacks" | "stacks" => Ok(Self::UnknownStacks),
            "unknown-components" | "components" => Ok(Self::UnknownComponents),
            "unknown-config-types" | "config-types" => Ok(Self::UnknownConfigTypes),
            "required-passwords" | "passwords" => Ok(Self::RequiredPasswords),
            other => Err(ApplicationError::UnknownRule {
                name: other.to_string(),
            }
            .into()),
        }
    }
}
