//! Deferred resolution of the stack metadata port.
//!
//! Validators are wired when the service starts, which can be before stack
//! metadata has been loaded. They therefore hold a [`MetadataHandle`] (a
//! zero-argument resolver) instead of a provider, and resolve it on every
//! `validate` call.
//!
//! [`MetadataSlot`] is the lazily-initialised holder most callers want:
//! hand its handle to the validators first, install the provider later.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::{
    application::{ApplicationError, ports::StackMetadataProvider},
    error::{RampartError, RampartResult},
};

type Resolver = dyn Fn() -> Option<Arc<dyn StackMetadataProvider>> + Send + Sync;

/// Cheap, cloneable accessor for the stack metadata provider.
#[derive(Clone)]
pub struct MetadataHandle {
    resolver: Arc<Resolver>,
}

impl MetadataHandle {
    /// Handle for a provider that already exists.
    pub fn ready(provider: Arc<dyn StackMetadataProvider>) -> Self {
        Self::from_fn(move || Some(Arc::clone(&provider)))
    }

    /// Handle backed by an arbitrary resolver. `None` means "not available
    /// yet" and makes every validator using this handle fail closed.
    pub fn from_fn<F>(resolver: F) -> Self
    where
        F: Fn() -> Option<Arc<dyn StackMetadataProvider>> + Send + Sync + 'static,
    {
        Self {
            resolver: Arc::new(resolver),
        }
    }

    /// Handle that never resolves.
    pub fn unavailable() -> Self {
        Self::from_fn(|| None)
    }

    /// Resolve the provider now.
    pub fn resolve(&self) -> RampartResult<Arc<dyn StackMetadataProvider>> {
        (self.resolver)().ok_or_else(|| {
            ApplicationError::MetadataUnavailable {
                reason: "no provider has been installed".into(),
            }
            .into()
        })
    }

    /// Resolve for use inside a validator: failure to resolve rejects the
    /// topology rather than letting it through unchecked.
    pub(crate) fn resolve_or_reject(&self) -> RampartResult<Arc<dyn StackMetadataProvider>> {
        self.resolve().map_err(|e| {
            RampartError::invalid_topology(format!(
                "Stack metadata unavailable, cannot validate cluster creation request: {}",
                unavailable_reason(&e)
            ))
        })
    }
}

fn unavailable_reason(err: &RampartError) -> String {
    match err {
        RampartError::Application(ApplicationError::MetadataUnavailable { reason }) => {
            reason.clone()
        }
        other => other.to_string(),
    }
}

impl fmt::Debug for MetadataHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataHandle").finish_non_exhaustive()
    }
}

/// Write-once holder for the stack metadata provider.
#[derive(Clone, Default)]
pub struct MetadataSlot {
    cell: Arc<OnceLock<Arc<dyn StackMetadataProvider>>>,
}

impl MetadataSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the provider. Only the first install succeeds.
    pub fn install(&self, provider: Arc<dyn StackMetadataProvider>) -> RampartResult<()> {
        self.cell
            .set(provider)
            .map_err(|_| RampartError::Configuration {
                message: "stack metadata provider is already installed".into(),
            })
    }

    pub fn is_installed(&self) -> bool {
        self.cell.get().is_some()
    }

    /// A handle that sees whatever is installed at resolve time.
    pub fn handle(&self) -> MetadataHandle {
        let cell = Arc::clone(&self.cell);
        MetadataHandle::from_fn(move || cell.get().cloned())
    }
}

impl fmt::Debug for MetadataSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataSlot")
            .field("installed", &self.is_installed())
            .finish()
    }
}
