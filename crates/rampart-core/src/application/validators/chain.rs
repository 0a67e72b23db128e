//! Ordered, fail-fast composition of validators.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::{
    application::{
        ports::MetadataHandle,
        validators::{TopologyValidator, ValidationRule},
    },
    domain::ClusterTopology,
    error::RampartResult,
};

/// An ordered list of validators run as one pipeline.
///
/// The topology is threaded through the validators in list order: each
/// output is the next input, and the chain's result is the output of the
/// last validator. The first rejection is returned as-is and no later
/// validator runs.
#[derive(Clone, Default)]
pub struct ValidatorChain {
    validators: Vec<Arc<dyn TopologyValidator>>,
}

impl ValidatorChain {
    pub fn new(validators: Vec<Arc<dyn TopologyValidator>>) -> Self {
        Self { validators }
    }

    pub fn builder() -> ValidatorChainBuilder {
        ValidatorChainBuilder::default()
    }

    /// Every built-in rule, in [`ValidationRule::STANDARD_ORDER`].
    pub fn standard(metadata: MetadataHandle) -> Self {
        Self::from_rules(&ValidationRule::STANDARD_ORDER, &metadata)
    }

    /// Built-in rules in a caller-specified order.
    pub fn from_rules(rules: &[ValidationRule], metadata: &MetadataHandle) -> Self {
        Self {
            validators: rules.iter().map(|r| r.instantiate(metadata)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Validator names in execution order.
    pub fn names(&self) -> Vec<&'static str> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    /// Run the chain.
    #[instrument(
        skip_all,
        fields(
            request_id = %topology.request_id(),
            cluster = %topology.cluster_name(),
            validators = self.validators.len()
        )
    )]
    pub fn run(&self, topology: ClusterTopology) -> RampartResult<ClusterTopology> {
        self.validators
            .iter()
            .try_fold(topology, |current, validator| {
                match validator.validate(current) {
                    Ok(next) => {
                        debug!(validator = validator.name(), "Validator passed");
                        Ok(next)
                    }
                    Err(e) => {
                        warn!(validator = validator.name(), error = %e, "Topology rejected");
                        Err(e)
                    }
                }
            })
    }
}

impl TopologyValidator for ValidatorChain {
    fn name(&self) -> &'static str {
        "chain"
    }

    fn validate(&self, topology: ClusterTopology) -> RampartResult<ClusterTopology> {
        self.run(topology)
    }
}

impl fmt::Debug for ValidatorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorChain")
            .field("validators", &self.names())
            .finish()
    }
}

/// Builder for [`ValidatorChain`]. Validators run in the order they are added.
#[derive(Default)]
pub struct ValidatorChainBuilder {
    validators: Vec<Arc<dyn TopologyValidator>>,
}

impl ValidatorChainBuilder {
    pub fn then<V>(mut self, validator: V) -> Self
    where
        V: TopologyValidator + 'static,
    {
        self.validators.push(Arc::new(validator));
        self
    }

    pub fn then_shared(mut self, validator: Arc<dyn TopologyValidator>) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn rule(mut self, rule: ValidationRule, metadata: &MetadataHandle) -> Self {
        self.validators.push(rule.instantiate(metadata));
        self
    }

    pub fn build(self) -> ValidatorChain {
        ValidatorChain {
            validators: self.validators,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use super::*;
    use crate::application::validators::FnValidator;
    use crate::error::RampartError;

    /// Counts calls and records the annotations it was handed.
    #[derive(Default)]
    struct Recording {
        calls: AtomicUsize,
        seen: Mutex<Vec<Option<String>>>,
    }

    impl TopologyValidator for Recording {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn validate(&self, topology: ClusterTopology) -> RampartResult<ClusterTopology> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen
                .lock()
                .unwrap()
                .push(topology.annotation("step").map(str::to_owned));
            Ok(topology)
        }
    }

    fn topology() -> ClusterTopology {
        ClusterTopology::builder().cluster_name("c1").build().unwrap()
    }

    fn reject(message: &'static str) -> impl TopologyValidator {
        FnValidator::new("reject", move |_: ClusterTopology| {
            Err(RampartError::invalid_topology(message))
        })
    }

    #[test]
    fn first_failure_stops_the_chain() {
        let second = Arc::new(Recording::default());
        let chain = ValidatorChain::builder()
            .then(reject("first rule failed"))
            .then_shared(second.clone())
            .build();

        let err = chain.run(topology()).unwrap_err();
        assert_eq!(err.to_string(), "first rule failed");
        assert_eq!(second.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn later_failures_cannot_mask_earlier_ones() {
        let chain = ValidatorChain::builder()
            .then(reject("first"))
            .then(reject("second"))
            .build();

        assert_eq!(chain.run(topology()).unwrap_err().to_string(), "first");
    }

    #[test]
    fn annotated_output_feeds_the_next_validator() {
        let second = Arc::new(Recording::default());
        let chain = ValidatorChain::builder()
            .then(FnValidator::new("annotate", |t: ClusterTopology| {
                Ok(t.with_annotation("step", "one"))
            }))
            .then_shared(second.clone())
            .build();

        let out = chain.run(topology()).unwrap();
        assert_eq!(*second.seen.lock().unwrap(), [Some("one".to_string())]);
        assert_eq!(out.annotation("step"), Some("one"));
    }

    #[test]
    fn result_is_output_of_last_validator() {
        let chain = ValidatorChain::builder()
            .then(FnValidator::new("a", |t: ClusterTopology| {
                Ok(t.with_annotation("step", "a"))
            }))
            .then(FnValidator::new("b", |t: ClusterTopology| {
                Ok(t.with_annotation("step", "b"))
            }))
            .build();

        assert_eq!(chain.run(topology()).unwrap().annotation("step"), Some("b"));
    }

    #[test]
    fn validators_run_in_insertion_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut builder = ValidatorChain::builder();
        for name in ["first", "second", "third"] {
            let log = Arc::clone(&log);
            builder = builder.then(FnValidator::new(name, move |t: ClusterTopology| {
                log.lock().unwrap().push(name);
                Ok(t)
            }));
        }
        let chain = builder.build();

        chain.run(topology()).unwrap();
        assert_eq!(*log.lock().unwrap(), ["first", "second", "third"]);
        assert_eq!(chain.names(), ["first", "second", "third"]);
    }

    #[test]
    fn empty_chain_returns_input() {
        let input = topology();
        let chain = ValidatorChain::default();
        assert!(chain.is_empty());
        assert_eq!(chain.run(input.clone()).unwrap(), input);
    }

    #[test]
    fn chains_nest() {
        let inner_seen = Arc::new(Recording::default());
        let inner = ValidatorChain::builder()
            .then(FnValidator::new("tag", |t: ClusterTopology| {
                Ok(t.with_annotation("step", "inner"))
            }))
            .build();
        let outer = ValidatorChain::builder()
            .then(inner)
            .then_shared(inner_seen.clone())
            .build();

        outer.run(topology()).unwrap();
        assert_eq!(*inner_seen.seen.lock().unwrap(), [Some("inner".to_string())]);
    }

    #[test]
    fn standard_chain_order() {
        let chain = ValidatorChain::standard(MetadataHandle::unavailable());
        assert_eq!(
            chain.names(),
            [
                "empty-host-groups",
                "unknown-stacks",
                "unknown-components",
                "unknown-config-types",
                "required-passwords"
            ]
        );
    }

    #[test]
    fn shared_chain_runs_concurrently() {
        let counter = Arc::new(Recording::default());
        let chain = Arc::new(ValidatorChain::builder().then_shared(counter.clone()).build());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let chain = Arc::clone(&chain);
                thread::spawn(move || {
                    let t = ClusterTopology::builder()
                        .cluster_name(format!("c{i}"))
                        .build()
                        .unwrap();
                    chain.run(t).unwrap().cluster_name().to_string()
                })
            })
            .collect();

        for (i, h) in handles.into_iter().enumerate() {
            assert_eq!(h.join().unwrap(), format!("c{i}"));
        }
        assert_eq!(counter.calls.load(Ordering::SeqCst), 8);
    }
}
