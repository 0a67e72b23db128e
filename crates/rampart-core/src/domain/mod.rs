// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Rampart.
//!
//! This module contains the topology model and stack metadata types. All
//! lookups against registered stacks go through ports defined in the
//! application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Immutable entities**: All domain objects are Clone + PartialEq
//! - **Sorted collections**: Sets and maps are ordered so reports are stable
//!
pub mod entities;
pub mod error;
pub mod value_objects;

pub use entities::{
    stack::StackDefinition,
    topology::{ClusterTopology, Configuration, HostGroup, HasName, NoName, TopologyBuilder},
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{PropertyRef, StackId};

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    // ========================================================================
    // StackId Tests
    // ========================================================================

    #[test]
    fn stack_id_parses_correctly() {
        let id = StackId::from_str("HDP-3.1").unwrap();
        assert_eq!(id.name(), "HDP");
        assert_eq!(id.version(), "3.1");
        assert_eq!(id.to_string(), "HDP-3.1");
    }

    #[test]
    fn stack_id_splits_on_last_dash() {
        let id = StackId::parse("MY-STACK-1.0").unwrap();
        assert_eq!(id.name(), "MY-STACK");
        assert_eq!(id.version(), "1.0");
    }

    #[test]
    fn stack_id_rejects_malformed() {
        assert!(StackId::parse("HDP").is_err());
        assert!(StackId::parse("-3.1").is_err());
        assert!(StackId::parse("HDP-").is_err());
        assert!(StackId::parse("").is_err());
    }

    #[test]
    #[should_panic]
    fn stack_id_new_rejects_empty_version() {
        StackId::new("HDP", "");
    }

    #[test]
    fn stack_id_sort_is_canonical() {
        let mut ids = vec![
            StackId::new("X", "1.0"),
            StackId::new("HDP", "3.1"),
            StackId::new("A", "1.0"),
            StackId::new("HDP", "2.6"),
        ];
        ids.sort();
        let rendered: Vec<String> = ids.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["A-1.0", "HDP-2.6", "HDP-3.1", "X-1.0"]);
    }

    #[test]
    fn stack_id_orders_by_rendered_string() {
        let mut ids = vec![
            StackId::parse("A-2").unwrap(),
            StackId::parse("A-1-0").unwrap(),
            StackId::parse("HDP-9.0").unwrap(),
            StackId::parse("HDP-10.0").unwrap(),
        ];
        ids.sort();
        let rendered: Vec<String> = ids.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["A-1-0", "A-2", "HDP-10.0", "HDP-9.0"]);
    }

    #[test]
    fn stack_ids_rendering_alike_stay_distinct() {
        let a = StackId::new("A", "1-0");
        let b = StackId::new("A-1", "0");
        assert_eq!(a.to_string(), b.to_string());
        assert_ne!(a.cmp(&b), std::cmp::Ordering::Equal);
        assert_eq!(a < b, b > a);
    }

    #[test]
    fn stack_id_converts_through_string() {
        let id = StackId::try_from(String::from("BIGTOP-1.0")).unwrap();
        assert_eq!(String::from(id), "BIGTOP-1.0");
    }

    // ========================================================================
    // PropertyRef Tests
    // ========================================================================

    #[test]
    fn property_ref_display() {
        let p = PropertyRef::new("hive-env", "hive_metastore_user_passwd");
        assert_eq!(p.to_string(), "hive-env/hive_metastore_user_passwd");
    }

    #[test]
    fn property_ref_orders_by_type_then_name() {
        let a = PropertyRef::new("a-env", "z");
        let b = PropertyRef::new("b-env", "a");
        assert!(a < b);
    }

    // ========================================================================
    // Error Tests
    // ========================================================================

    #[test]
    fn invalid_topology_is_validation() {
        let err = DomainError::InvalidTopology("x".into());
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.to_string(), "x");
        assert!(!err.suggestions().is_empty());
    }

    #[test]
    fn stack_not_found_is_not_found() {
        let err = DomainError::StackNotFound("HDP-9.9".into());
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }
}
