//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `RAMPART_<SECTION>__<KEY>`, for example
//!    `RAMPART_CATALOG__STACKS_DIR=./stacks` or
//!    `RAMPART_VALIDATION__RULES=unknown-stacks,unknown-components`
//! 3. Config file (`--config FILE`, else the platform config dir)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use rampart_core::application::ValidationRule;
use rampart_core::error::{RampartError, RampartResult};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub validation: ValidationConfig,
    pub catalog: CatalogConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationConfig {
    /// Rule names, run in this order.
    pub rules: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// Directory of stack TOML files loaded on top of the built-ins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stacks_dir: Option<PathBuf>,
    /// Register the stacks that ship with Rampart.
    pub builtin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`.
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            validation: ValidationConfig {
                rules: ValidationRule::STANDARD_ORDER
                    .iter()
                    .map(|r| r.as_str().to_owned())
                    .collect(),
            },
            catalog: CatalogConfig {
                stacks_dir: None,
                builtin: true,
            },
            output: OutputConfig {
                no_color: false,
                format: "auto".into(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then the
    /// environment.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?);

        builder = match config_file {
            Some(path) => builder.add_source(config::File::from(path).required(true)),
            None => builder.add_source(config::File::from(Self::config_path()).required(false)),
        };

        builder = builder.add_source(
            config::Environment::with_prefix("RAMPART")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("validation.rules"),
        );

        builder
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")
    }

    /// Configured rules, parsed in order.
    ///
    /// An empty list is a configuration error: it would accept every request
    /// unchecked.
    pub fn rules(&self) -> RampartResult<Vec<ValidationRule>> {
        if self.validation.rules.is_empty() {
            return Err(RampartError::Configuration {
                message: "validation.rules is empty; at least one rule must be enabled".into(),
            });
        }
        self.validation.rules.iter().map(|r| r.parse()).collect()
    }

    /// Look up a value by dotted key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "validation.rules" => Some(self.validation.rules.join(",")),
            "catalog.stacks_dir" => Some(
                self.catalog
                    .stacks_dir
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            "catalog.builtin" => Some(self.catalog.builtin.to_string()),
            "output.no_color" => Some(self.output.no_color.to_string()),
            "output.format" => Some(self.output.format.clone()),
            _ => None,
        }
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.rampart.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("io", "rampart", "rampart")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".rampart.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_rules_follow_standard_order() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.rules().unwrap(), ValidationRule::STANDARD_ORDER);
    }

    #[test]
    fn default_registers_builtin_stacks() {
        let cfg = AppConfig::default();
        assert!(cfg.catalog.builtin);
        assert!(cfg.catalog.stacks_dir.is_none());
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rampart.toml");
        std::fs::write(
            &path,
            r#"
                [validation]
                rules = ["unknown-stacks"]

                [catalog]
                stacks_dir = "/srv/stacks"
                builtin = false
            "#,
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.rules().unwrap(), [ValidationRule::UnknownStacks]);
        assert_eq!(cfg.catalog.stacks_dir, Some(PathBuf::from("/srv/stacks")));
        assert!(!cfg.catalog.builtin);
        // untouched sections keep their defaults
        assert_eq!(cfg.output.format, "auto");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        assert!(AppConfig::load(Some(Path::new("/definitely/not/here.toml"))).is_err());
    }

    #[test]
    fn unknown_rule_name_is_reported() {
        let mut cfg = AppConfig::default();
        cfg.validation.rules.push("no-such-rule".into());
        assert!(cfg.rules().is_err());
    }

    #[test]
    fn empty_rule_list_is_a_configuration_error() {
        let mut cfg = AppConfig::default();
        cfg.validation.rules.clear();
        let err = cfg.rules().unwrap_err();
        assert!(matches!(err, RampartError::Configuration { .. }));
        assert!(err.to_string().contains("validation.rules is empty"));
    }

    #[test]
    fn get_known_and_unknown_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("catalog.builtin").as_deref(), Some("true"));
        assert_eq!(cfg.get("catalog.stacks_dir").as_deref(), Some(""));
        assert!(cfg.get("does.not.exist").is_none());
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
