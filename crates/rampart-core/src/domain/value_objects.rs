//! Domain value objects: StackId, PropertyRef.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. Both
//! carry a total order so that any report built from them can be produced in
//! a canonical sorted order.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

// ── StackId ──────────────────────────────────────────────────────────────────

/// Identifier of a stack: a named, versioned bundle of service definitions.
///
/// Rendered as `NAME-VERSION`, e.g. `HDP-3.1`. Ordering is lexicographic on
/// the rendered form, so reports list ids in plain string order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StackId {
    name: String,
    version: String,
}

impl StackId {
    /// Create a stack id.
    ///
    /// # Panics
    ///
    /// Panics if either part is empty. Use [`StackId::parse`] for untrusted
    /// input.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        let name = name.into();
        let version = version.into();
        assert!(!name.is_empty(), "stack name cannot be empty");
        assert!(!version.is_empty(), "stack version cannot be empty");
        Self { name, version }
    }

    /// Parse from `NAME-VERSION`. The split happens at the last `-`, so
    /// names may themselves contain dashes (`MY-STACK-1.0`).
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let s = s.trim();
        let (name, version) = s.rsplit_once('-').ok_or_else(|| DomainError::InvalidStackId {
            value: s.to_string(),
            reason: "expected NAME-VERSION".into(),
        })?;

        if name.is_empty() || version.is_empty() {
            return Err(DomainError::InvalidStackId {
                value: s.to_string(),
                reason: "name and version must both be non-empty".into(),
            });
        }

        Ok(Self {
            name: name.to_string(),
            version: version.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    fn rendered_bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.name
            .bytes()
            .chain(std::iter::once(b'-'))
            .chain(self.version.bytes())
    }
}

impl fmt::Display for StackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.name, self.version)
    }
}

impl Ord for StackId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rendered_bytes()
            .cmp(other.rendered_bytes())
            // `A`/`1-0` and `A-1`/`0` render alike but are distinct ids
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for StackId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for StackId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for StackId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StackId> for String {
    fn from(id: StackId) -> Self {
        id.to_string()
    }
}

// ── PropertyRef ──────────────────────────────────────────────────────────────

/// Reference to one configuration property: `config_type/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PropertyRef {
    pub config_type: String,
    pub name: String,
}

impl PropertyRef {
    pub fn new(config_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            config_type: config_type.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for PropertyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.config_type, self.name)
    }
}
