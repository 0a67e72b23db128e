//! Command handlers, one module per subcommand.

pub mod completions;
pub mod config;
pub mod init;
pub mod rules;
pub mod stacks;
pub mod validate;

use std::path::Path;

use tracing::{debug, info};

use rampart_adapters::{InMemoryStackRegistry, StackCatalogLoader};

use crate::{config::AppConfig, error::CliResult};

/// Build the stack registry the commands validate against: built-ins when
/// enabled, then the configured catalog, then `--stacks` if given.
pub(crate) fn build_registry(
    stacks_dir: Option<&Path>,
    config: &AppConfig,
) -> CliResult<InMemoryStackRegistry> {
    let registry = if config.catalog.builtin {
        InMemoryStackRegistry::with_builtin()?
    } else {
        debug!("built-in stacks disabled");
        InMemoryStackRegistry::new()
    };

    let dirs = config.catalog.stacks_dir.as_deref().into_iter().chain(stacks_dir);
    for dir in dirs {
        let stacks = StackCatalogLoader::new(dir).load_all()?;
        info!(dir = %dir.display(), count = stacks.len(), "registering catalog stacks");
        registry.extend(stacks)?;
    }

    Ok(registry)
}
