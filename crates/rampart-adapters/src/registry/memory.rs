//! In-memory stack registry with built-in stack definitions.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use tracing::{debug, warn};

use rampart_core::{
    application::{ApplicationError, ports::StackMetadataProvider},
    domain::{DomainError, StackDefinition, StackId},
    error::{RampartError, RampartResult},
};

use crate::builtin_stacks;

/// Thread-safe in-memory stack registry.
///
/// Clones share the same underlying map, so one clone can be installed as
/// the metadata provider while another keeps registering stacks.
#[derive(Clone)]
pub struct InMemoryStackRegistry {
    inner: Arc<RwLock<HashMap<StackId, StackDefinition>>>,
}

impl InMemoryStackRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a registry with the built-in stacks loaded.
    pub fn with_builtin() -> RampartResult<Self> {
        let registry = Self::new();
        registry.load_builtin()?;
        Ok(registry)
    }

    /// Register the built-in stacks.
    pub fn load_builtin(&self) -> RampartResult<()> {
        self.extend(builtin_stacks::all_stacks())
    }

    /// Register many definitions at once.
    pub fn extend(&self, definitions: impl IntoIterator<Item = StackDefinition>) -> RampartResult<()> {
        for definition in definitions {
            self.insert(definition)?;
        }
        Ok(())
    }

    /// Insert or replace a stack definition.
    pub fn insert(&self, definition: StackDefinition) -> RampartResult<()> {
        definition.validate().map_err(RampartError::Domain)?;

        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        if inner.insert(definition.id.clone(), definition).is_some() {
            debug!("Replaced existing stack definition");
        }
        Ok(())
    }

    /// Remove a stack definition.
    pub fn remove(&self, id: &StackId) -> RampartResult<StackDefinition> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner
            .remove(id)
            .ok_or_else(|| DomainError::StackNotFound(id.to_string()).into())
    }

    /// Get a registered definition.
    pub fn get(&self, id: &StackId) -> RampartResult<StackDefinition> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::StackNotFound(id.to_string()).into())
    }

    /// All definitions, sorted by stack id.
    pub fn list(&self) -> RampartResult<Vec<StackDefinition>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let mut stacks: Vec<StackDefinition> = inner.values().cloned().collect();
        stacks.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(stacks)
    }

    /// Number of registered stacks. A poisoned lock counts as empty.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every stack.
    pub fn clear(&self) -> RampartResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.clear();
        Ok(())
    }
}

impl Default for InMemoryStackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl StackMetadataProvider for InMemoryStackRegistry {
    // A poisoned lock answers "unknown": the topology is rejected rather
    // than passed through unchecked.
    fn is_known_stack(&self, id: &StackId) -> bool {
        match self.inner.read() {
            Ok(inner) => inner.contains_key(id),
            Err(_) => {
                warn!(stack = %id, "Stack registry lock poisoned");
                false
            }
        }
    }

    fn stack_definition(&self, id: &StackId) -> Option<StackDefinition> {
        match self.inner.read() {
            Ok(inner) => inner.get(id).cloned(),
            Err(_) => {
                warn!(stack = %id, "Stack registry lock poisoned");
                None
            }
        }
    }
}
