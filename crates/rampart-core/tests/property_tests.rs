//! Property-based tests for the stack rule.
//!
//! Known and requested stack sets are generated at random; the rule must
//! behave the same for every input order and every run.

use std::collections::BTreeSet;
use std::sync::Arc;

use proptest::prelude::*;
use proptest::sample::Index;

use rampart_core::{
    application::{MetadataHandle, RejectUnknownStacks, StackMetadataProvider, TopologyValidator},
    domain::{ClusterTopology, StackDefinition, StackId},
};

const PREFIX: &str = "Unknown stacks found in cluster creation request: ";

struct KnownStacks(BTreeSet<StackId>);

impl StackMetadataProvider for KnownStacks {
    fn is_known_stack(&self, id: &StackId) -> bool {
        self.0.contains(id)
    }

    fn stack_definition(&self, id: &StackId) -> Option<StackDefinition> {
        self.0.get(id).cloned().map(StackDefinition::new)
    }
}

/// Stack names may contain dashes; versions never do, so every id renders
/// uniquely.
fn stack_id() -> impl Strategy<Value = StackId> {
    ("[A-Z][A-Z0-9-]{0,6}", "[0-9]{1,2}\\.[0-9]{1,2}")
        .prop_map(|(name, version)| StackId::new(name, version))
}

fn rule(known: &BTreeSet<StackId>) -> RejectUnknownStacks {
    RejectUnknownStacks::new(MetadataHandle::ready(Arc::new(KnownStacks(known.clone()))))
}

fn topology(stacks: &[StackId]) -> ClusterTopology {
    ClusterTopology::builder()
        .cluster_name("prop")
        .stacks(stacks.iter().cloned())
        .build()
        .unwrap()
}

fn outcome(validator: &RejectUnknownStacks, stacks: &[StackId]) -> Result<(), String> {
    validator
        .validate(topology(stacks))
        .map(|_| ())
        .map_err(|e| e.to_string())
}

proptest! {
    /// Any selection from the known set, duplicates included, passes
    /// unchanged.
    #[test]
    fn subset_of_known_passes(
        known in prop::collection::btree_set(stack_id(), 1..8),
        picks in prop::collection::vec(any::<Index>(), 0..12),
    ) {
        let pool: Vec<StackId> = known.iter().cloned().collect();
        let requested: Vec<StackId> = picks.iter().map(|i| i.get(&pool).clone()).collect();

        let input = topology(&requested);
        let out = rule(&known).validate(input.clone());
        prop_assert_eq!(out.ok(), Some(input));
    }

    /// Every unknown id appears exactly once, in string order.
    #[test]
    fn unknowns_listed_once_and_sorted(
        known in prop::collection::btree_set(stack_id(), 0..6),
        requested in prop::collection::vec(stack_id(), 0..12),
    ) {
        let expected: BTreeSet<String> = requested
            .iter()
            .filter(|id| !known.contains(*id))
            .map(ToString::to_string)
            .collect();

        match outcome(&rule(&known), &requested) {
            Ok(()) => prop_assert!(expected.is_empty()),
            Err(message) => {
                let listed = message.strip_prefix(PREFIX);
                prop_assert!(listed.is_some(), "unexpected message: {}", message);
                let listed: Vec<&str> = listed.unwrap_or_default().split(", ").collect();
                let expected: Vec<&str> = expected.iter().map(String::as_str).collect();
                prop_assert_eq!(listed, expected);
            }
        }
    }

    /// Input order and repeated runs never change the outcome.
    #[test]
    fn outcome_ignores_order_and_repeats(
        known in prop::collection::btree_set(stack_id(), 0..6),
        requested in prop::collection::vec(stack_id(), 0..12),
    ) {
        let validator = rule(&known);
        let mut reversed = requested.clone();
        reversed.reverse();

        let first = outcome(&validator, &requested);
        prop_assert_eq!(&first, &outcome(&validator, &reversed));
        prop_assert_eq!(&first, &outcome(&validator, &requested));
    }

    /// A passing topology passes again when fed back in.
    #[test]
    fn passing_is_idempotent(
        known in prop::collection::btree_set(stack_id(), 1..8),
    ) {
        let requested: Vec<StackId> = known.iter().cloned().collect();
        let validator = rule(&known);

        let once = validator.validate(topology(&requested)).ok();
        prop_assert!(once.is_some());
        let once = once.unwrap();
        let twice = validator.validate(once.clone()).ok();
        prop_assert_eq!(twice, Some(once));
    }
}
