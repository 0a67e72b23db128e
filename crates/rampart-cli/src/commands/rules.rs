//! Implementation of the `rampart rules` command.

use rampart_core::application::ValidationRule;

use crate::{cli::OutputFormat, config::AppConfig, error::CliResult, output::OutputManager};

pub fn execute(config: AppConfig, output: OutputManager) -> CliResult<()> {
    let enabled = config.rules()?;

    if output.format() == OutputFormat::Json {
        let rows: Vec<_> = ValidationRule::STANDARD_ORDER
            .iter()
            .map(|rule| {
                serde_json::json!({
                    "name": rule.as_str(),
                    "description": rule.description(),
                    "uses_metadata": rule.uses_metadata(),
                    "enabled": enabled.contains(rule),
                })
            })
            .collect();
        output.json(&rows)?;
        return Ok(());
    }

    output.header("Validation Rules (standard order):")?;
    for rule in ValidationRule::STANDARD_ORDER {
        let marker = if enabled.contains(&rule) { "*" } else { " " };
        output.print(&format!(
            "  {marker} {:<22} {}",
            rule.as_str(),
            rule.description()
        ))?;
    }
    output.print("")?;
    output.print("  * enabled by validation.rules")?;
    Ok(())
}
