//! Implementation of the `rampart stacks` command.

use serde::Serialize;

use rampart_core::domain::StackDefinition;

use crate::{
    cli::{ListFormat, StacksArgs},
    commands::build_registry,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// One row of `rampart stacks --format json`.
#[derive(Debug, Serialize)]
struct StackSummary {
    id: String,
    components: usize,
    config_types: usize,
    password_properties: Vec<String>,
}

impl From<&StackDefinition> for StackSummary {
    fn from(def: &StackDefinition) -> Self {
        Self {
            id: def.id.to_string(),
            components: def.components.len(),
            config_types: def.config_types.len(),
            password_properties: def
                .password_properties
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

pub fn execute(args: StacksArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let registry = build_registry(args.stacks.as_deref(), &config)?;
    let stacks = registry.list()?;

    match args.format {
        ListFormat::Table => {
            if stacks.is_empty() {
                output.warning("No stacks registered")?;
                return Ok(());
            }
            output.header("Registered Stacks:")?;
            output.print(&format!(
                "  {:<16} {:>10} {:>12} {:>10}",
                "STACK", "COMPONENTS", "CONFIG TYPES", "PASSWORDS"
            ))?;
            for def in &stacks {
                output.print(&format!(
                    "  {:<16} {:>10} {:>12} {:>10}",
                    def.id.to_string(),
                    def.components.len(),
                    def.config_types.len(),
                    def.password_properties.len()
                ))?;
            }
        }

        ListFormat::List => {
            for def in &stacks {
                output.print(&def.id.to_string())?;
            }
        }

        ListFormat::Json => {
            let rows: Vec<StackSummary> = stacks.iter().map(StackSummary::from).collect();
            output.json(&rows)?;
        }
    }

    Ok(())
}
