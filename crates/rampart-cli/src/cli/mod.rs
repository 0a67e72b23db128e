//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "rampart",
    bin_name = "rampart",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Validate cluster creation requests before provisioning",
    long_about = "Rampart runs a cluster creation request through a chain of \
                  validators and rejects it before any host is touched if it \
                  names unknown stacks, components, or configuration types.",
    after_help = "EXAMPLES:\n\
        \x20 rampart validate cluster.toml\n\
        \x20 rampart validate cluster.json --stacks ./stacks --rule unknown-stacks\n\
        \x20 rampart stacks --format list\n\
        \x20 rampart completions bash > /usr/share/bash-completion/completions/rampart",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate a cluster creation request.
    #[command(
        visible_alias = "v",
        about = "Validate a cluster creation request",
        after_help = "EXAMPLES:\n\
            \x20 rampart validate cluster.toml\n\
            \x20 rampart validate cluster.json --format json\n\
            \x20 rampart validate cluster.toml --rule unknown-stacks --rule unknown-components"
    )]
    Validate(ValidateArgs),

    /// List registered stacks.
    #[command(
        visible_alias = "ls",
        about = "List registered stacks",
        after_help = "EXAMPLES:\n\
            \x20 rampart stacks\n\
            \x20 rampart stacks --stacks ./stacks --format json"
    )]
    Stacks(StacksArgs),

    /// List built-in validation rules in standard order.
    #[command(about = "List built-in validation rules")]
    Rules,

    /// Initialise a Rampart configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 rampart init\n\
            \x20 rampart init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 rampart completions bash > ~/.local/share/bash-completion/completions/rampart\n\
            \x20 rampart completions zsh  > ~/.zfunc/_rampart\n\
            \x20 rampart completions fish > ~/.config/fish/completions/rampart.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Rampart configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 rampart config get validation.rules\n\
            \x20 rampart config list\n\
            \x20 rampart config path"
    )]
    Config(ConfigCommands),
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Arguments for `rampart validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Request file (`.toml` or `.json`).
    #[arg(value_name = "REQUEST", help = "Cluster creation request file")]
    pub request: PathBuf,

    /// Directory of stack definition files, in addition to the built-ins.
    #[arg(
        short = 's',
        long = "stacks",
        value_name = "DIR",
        help = "Directory of stack definition files"
    )]
    pub stacks: Option<PathBuf>,

    /// Run only these rules, in the order given.
    #[arg(
        short = 'r',
        long = "rule",
        value_name = "NAME",
        help = "Rule to run (repeatable; default: every configured rule)"
    )]
    pub rules: Vec<String>,

    /// Report format.
    #[arg(long = "format", value_enum, help = "Report format")]
    pub format: Option<ReportFormat>,
}

/// Output format for the `validate` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable summary.
    Human,
    /// JSON report on stdout.
    Json,
}

// ── stacks ────────────────────────────────────────────────────────────────────

/// Arguments for `rampart stacks`.
#[derive(Debug, Args)]
pub struct StacksArgs {
    /// Directory of stack definition files, in addition to the built-ins.
    #[arg(
        short = 's',
        long = "stacks",
        value_name = "DIR",
        help = "Directory of stack definition files"
    )]
    pub stacks: Option<PathBuf>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `stacks` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One id per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `rampart init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `rampart completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `rampart config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `catalog.stacks_dir`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
