//! Stack metadata as seen by validation rules.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    value_objects::{PropertyRef, StackId},
};

/// What a registered stack offers: the components that may be placed in host
/// groups, the configuration types it understands, and the password
/// properties that must be set when their configuration type is in use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackDefinition {
    pub id: StackId,
    #[serde(default)]
    pub components: BTreeSet<String>,
    #[serde(default)]
    pub config_types: BTreeSet<String>,
    #[serde(default)]
    pub password_properties: BTreeSet<PropertyRef>,
}

impl StackDefinition {
    pub fn new(id: StackId) -> Self {
        Self {
            id,
            components: BTreeSet::new(),
            config_types: BTreeSet::new(),
            password_properties: BTreeSet::new(),
        }
    }

    pub fn with_components<I, S>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.components.extend(components.into_iter().map(Into::into));
        self
    }

    pub fn with_config_types<I, S>(mut self, config_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config_types
            .extend(config_types.into_iter().map(Into::into));
        self
    }

    /// Declare a password property. Its config type is registered too.
    pub fn with_password(
        mut self,
        config_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let property = PropertyRef::new(config_type, name);
        self.config_types.insert(property.config_type.clone());
        self.password_properties.insert(property);
        self
    }

    pub fn offers_component(&self, component: &str) -> bool {
        self.components.contains(component)
    }

    pub fn declares_config_type(&self, config_type: &str) -> bool {
        self.config_types.contains(config_type)
    }

    /// Check internal consistency: every password property must belong to a
    /// declared config type, and no name may be blank.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.components.iter().any(|c| c.trim().is_empty()) {
            return Err(DomainError::InvalidStackId {
                value: self.id.to_string(),
                reason: "component names cannot be empty".into(),
            });
        }

        if let Some(orphan) = self
            .password_properties
            .iter()
            .find(|p| !self.config_types.contains(&p.config_type))
        {
            return Err(DomainError::InvalidStackId {
                value: self.id.to_string(),
                reason: format!("password property {orphan} uses an undeclared config type"),
            });
        }

        Ok(())
    }
}
