//! Implementation of the `rampart validate` command.
//!
//! Responsibility: load the request and the stack registry, run the
//! configured validator chain, and report the outcome. No rule logic lives
//! here.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument};

use rampart_adapters::RequestLoader;
use rampart_core::{
    application::{
        MetadataSlot, ValidationOutcome, ValidationRule, ValidationService, ValidatorChain,
    },
    error::RampartError,
};

use crate::{
    cli::{OutputFormat, ReportFormat, ValidateArgs},
    commands::build_registry,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// JSON report written for `--format json`.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum Report {
    Accepted {
        request_id: String,
        cluster: String,
        stacks: Vec<String>,
        validators: Vec<&'static str>,
        annotations: BTreeMap<String, String>,
        validated_at: DateTime<Utc>,
    },
    Rejected {
        request: String,
        message: String,
    },
}

impl Report {
    fn accepted(outcome: &ValidationOutcome) -> Self {
        Self::Accepted {
            request_id: outcome.request_id().to_string(),
            cluster: outcome.topology.cluster_name().to_owned(),
            stacks: outcome
                .topology
                .stack_ids()
                .iter()
                .map(ToString::to_string)
                .collect(),
            validators: outcome.validators.clone(),
            annotations: outcome.topology.annotations().clone(),
            validated_at: outcome.validated_at,
        }
    }
}

/// Execute the `rampart validate` command.
///
/// The chain is wired to an empty metadata slot first and the registry is
/// installed once it has loaded, the same order a long-running service
/// would use.
#[instrument(skip_all, fields(request = %args.request.display()))]
pub fn execute(args: ValidateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    if !args.request.is_file() {
        return Err(CliError::RequestNotFound { path: args.request });
    }

    let rules = resolve_rules(&args.rules, &config)?;
    debug!(rules = ?rules, "resolved validation rules");

    let slot = MetadataSlot::new();
    let service = ValidationService::new(ValidatorChain::from_rules(&rules, &slot.handle()));

    let registry = build_registry(args.stacks.as_deref(), &config)?;
    info!(stacks = registry.len(), "stack registry ready");
    slot.install(Arc::new(registry))?;

    let topology = RequestLoader::new().load(&args.request)?;

    let format = args.format.unwrap_or(match output.format() {
        OutputFormat::Json => ReportFormat::Json,
        _ => ReportFormat::Human,
    });

    match service.validate(topology) {
        Ok(outcome) => report_accepted(&outcome, format, &output),
        Err(err) => {
            if format == ReportFormat::Json && err.is_topology_rejection() {
                output.json(&Report::Rejected {
                    request: args.request.display().to_string(),
                    message: err.to_string(),
                })?;
            }
            Err(err.into())
        }
    }
}

/// Rules from `--rule` win over `validation.rules`.
fn resolve_rules(requested: &[String], config: &AppConfig) -> CliResult<Vec<ValidationRule>> {
    if requested.is_empty() {
        return Ok(config.rules()?);
    }

    requested
        .iter()
        .map(|name| {
            name.parse().map_err(|e: RampartError| CliError::InvalidInput {
                message: format!("--rule {name}"),
                source: Some(Box::new(e)),
            })
        })
        .collect()
}

fn report_accepted(
    outcome: &ValidationOutcome,
    format: ReportFormat,
    output: &OutputManager,
) -> CliResult<()> {
    if format == ReportFormat::Json {
        output.json(&Report::accepted(outcome))?;
        return Ok(());
    }

    output.success(&format!(
        "Cluster '{}' passed {} validator(s)",
        outcome.topology.cluster_name(),
        outcome.validators.len()
    ))?;
    output.print(&format!("  request:    {}", outcome.request_id()))?;
    output.print(&format!("  validators: {}", outcome.validators.join(", ")))?;

    for (key, value) in outcome.topology.annotations() {
        output.info(&format!("{key}: {value}"))?;
    }
    Ok(())
}
