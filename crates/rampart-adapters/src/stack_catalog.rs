//! Filesystem-based stack catalog.
//!
//! Discovers `*.toml` stack manifests anywhere under a catalog directory and
//! converts them into domain [`StackDefinition`] objects ready to be
//! registered with a stack registry.
//!
//! # Directory layout expected
//!
//! ```text
//! stacks/
//! ├── hdp/
//! │   ├── hdp-2.6.toml
//! │   └── hdp-3.1.toml
//! └── bigtop-1.0.toml
//! ```
//!
//! # Manifest format
//!
//! ```toml
//! id           = "HDP-3.1"                    # NAME-VERSION
//! components   = ["NAMENODE", "DATANODE"]     # optional
//! config_types = ["core-site", "hdfs-site"]   # optional
//!
//! # Password properties that must be set whenever their config type is used.
//! # The config type is registered automatically.
//! [[passwords]]
//! config_type = "hive-env"
//! name        = "hive_metastore_user_passwd"
//! ```

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

use rampart_core::{
    application::ApplicationError,
    domain::{StackDefinition, StackId},
};

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of one stack manifest.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct StackManifest {
    /// Stack id in `NAME-VERSION` form, e.g. `"HDP-3.1"`.
    pub id: String,
    #[serde(default)]
    pub components: Vec<String>,
    #[serde(default)]
    pub config_types: Vec<String>,
    #[serde(default)]
    pub passwords: Vec<PasswordEntry>,
}

/// One entry under `[[passwords]]`.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct PasswordEntry {
    pub config_type: String,
    pub name: String,
}

impl StackManifest {
    /// Convert into a checked [`StackDefinition`].
    pub fn into_definition(self) -> Result<StackDefinition, String> {
        let id = StackId::parse(&self.id).map_err(|e| e.to_string())?;

        let definition = self.passwords.into_iter().fold(
            StackDefinition::new(id)
                .with_components(self.components)
                .with_config_types(self.config_types),
            |def, p| def.with_password(p.config_type, p.name),
        );

        definition.validate().map_err(|e| e.to_string())?;
        Ok(definition)
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads [`StackDefinition`]s from a directory tree of TOML manifests.
///
/// Files are visited in path order so the result is the same on every run.
/// A file that cannot be parsed emits a `WARN` log and is skipped; the
/// stack it describes stays unknown, so requests naming it are rejected.
///
/// # Example
///
/// ```no_run
/// use rampart_adapters::StackCatalogLoader;
///
/// let loader = StackCatalogLoader::new("./stacks");
/// let stacks = loader.load_all()?;
/// println!("Loaded {} stacks", stacks.len());
/// # Ok::<(), rampart_core::application::ApplicationError>(())
/// ```
pub struct StackCatalogLoader {
    catalog_dir: PathBuf,
}

impl StackCatalogLoader {
    pub fn new(catalog_dir: impl Into<PathBuf>) -> Self {
        Self {
            catalog_dir: catalog_dir.into(),
        }
    }

    pub fn catalog_dir(&self) -> &Path {
        &self.catalog_dir
    }

    /// Load every valid stack manifest under the catalog directory.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::CatalogLoad`] if the directory does not
    /// exist or cannot be walked. Individual malformed manifests are
    /// skipped with a warning.
    #[instrument(skip(self), fields(dir = %self.catalog_dir.display()))]
    pub fn load_all(&self) -> Result<Vec<StackDefinition>, ApplicationError> {
        if !self.catalog_dir.is_dir() {
            return Err(ApplicationError::CatalogLoad {
                path: self.catalog_dir.clone(),
                reason: "catalog directory not found".into(),
            });
        }

        let mut stacks: BTreeMap<StackId, (PathBuf, StackDefinition)> = BTreeMap::new();

        for entry in WalkDir::new(&self.catalog_dir).sort_by_file_name() {
            let entry = entry.map_err(|e| ApplicationError::CatalogLoad {
                path: e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.catalog_dir.clone()),
                reason: e.to_string(),
            })?;

            let path = entry.path();
            if !entry.file_type().is_file() || !is_toml(path) {
                continue;
            }

            match self.load_file(path) {
                Ok(definition) => {
                    debug!(
                        id = %definition.id,
                        components = definition.components.len(),
                        config_types = definition.config_types.len(),
                        "loaded stack"
                    );
                    if let Some((previous, _)) = stacks.get(&definition.id) {
                        warn!(
                            id = %definition.id,
                            previous = %previous.display(),
                            file = %path.display(),
                            "stack declared twice, keeping the later file"
                        );
                    }
                    stacks.insert(definition.id.clone(), (path.to_path_buf(), definition));
                }
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "skipping stack manifest");
                }
            }
        }

        info!(count = stacks.len(), "stack catalog loaded");
        Ok(stacks.into_values().map(|(_, def)| def).collect())
    }

    /// Load a single manifest file.
    pub fn load_file(&self, path: &Path) -> Result<StackDefinition, ApplicationError> {
        let load_error = |reason: String| ApplicationError::CatalogLoad {
            path: path.to_path_buf(),
            reason,
        };

        let raw = fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
        let manifest: StackManifest =
            toml::from_str(&raw).map_err(|e| load_error(e.to_string()))?;
        manifest.into_definition().map_err(load_error)
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}
