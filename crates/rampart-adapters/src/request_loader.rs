//! Cluster creation request loader.
//!
//! Reads a request file written as TOML or JSON and turns it into a
//! [`ClusterTopology`]. The format is picked from the file extension.
//!
//! ```toml
//! cluster_name     = "analytics"
//! stack            = "HDP-3.1"
//! default_password = "changeme"      # optional
//!
//! [[host_groups]]
//! name       = "master"
//! components = ["NAMENODE", "HIVE_METASTORE"]
//! hosts      = ["master1.example.com"]
//!
//! [[host_groups]]
//! name       = "edge"
//! stack      = "HDF-3.2"             # optional per-group stack
//! components = ["NIFI_MASTER"]
//!
//! [configurations.core-site]
//! "fs.defaultFS" = "hdfs://master1:8020"
//! ```

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, instrument};
use uuid::Uuid;

use rampart_core::{
    application::ApplicationError,
    domain::{ClusterTopology, Configuration, HostGroup, StackId},
};

/// On-disk shape of a cluster creation request.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ClusterRequest {
    /// Fixed id for log correlation. A fresh one is generated when absent.
    pub request_id: Option<Uuid>,
    pub cluster_name: String,
    /// Stack for every host group that does not name its own.
    pub stack: Option<String>,
    pub default_password: Option<String>,
    #[serde(default)]
    pub host_groups: Vec<HostGroupEntry>,
    #[serde(default)]
    pub configurations: BTreeMap<String, BTreeMap<String, String>>,
}

/// One entry under `[[host_groups]]`.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct HostGroupEntry {
    pub name: String,
    pub stack: Option<String>,
    #[serde(default)]
    pub components: Vec<String>,
    #[serde(default)]
    pub hosts: Vec<String>,
}

impl ClusterRequest {
    /// Build the topology. Every distinct stack id, whether declared at the
    /// request level or on a host group, ends up in the topology's stack set.
    pub fn into_topology(self) -> Result<ClusterTopology, String> {
        let mut stacks = Vec::new();
        if let Some(stack) = &self.stack {
            stacks.push(parse_stack(stack)?);
        }

        let mut builder = ClusterTopology::builder().cluster_name(self.cluster_name);
        if let Some(id) = self.request_id {
            builder = builder.request_id(id);
        }

        for entry in self.host_groups {
            if let Some(stack) = &entry.stack {
                stacks.push(parse_stack(stack)?);
            }
            let group = entry
                .components
                .into_iter()
                .fold(HostGroup::new(entry.name), HostGroup::with_component);
            builder = builder.host_group(entry.hosts.into_iter().fold(group, HostGroup::with_host));
        }

        let mut configuration = Configuration::new();
        for (config_type, properties) in self.configurations {
            for (name, value) in properties {
                configuration.set(config_type.clone(), name, value);
            }
        }

        builder = builder.stacks(stacks).configuration(configuration);
        if let Some(password) = self.default_password {
            builder = builder.default_password(password);
        }

        builder.build().map_err(|e| e.to_string())
    }
}

fn parse_stack(raw: &str) -> Result<StackId, String> {
    StackId::parse(raw).map_err(|e| e.to_string())
}

/// Supported request file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestFormat {
    Toml,
    Json,
}

impl RequestFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Loads cluster creation requests from disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestLoader;

impl RequestLoader {
    pub fn new() -> Self {
        Self
    }

    /// Read and parse a request file.
    ///
    /// # Errors
    ///
    /// [`ApplicationError::RequestLoad`] if the file is missing, has an
    /// unsupported extension, does not parse, or describes an invalid
    /// topology (blank cluster name, malformed stack id, duplicate group).
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn load(&self, path: &Path) -> Result<ClusterTopology, ApplicationError> {
        let load_error = |reason: String| ApplicationError::RequestLoad {
            path: PathBuf::from(path),
            reason,
        };

        let format = RequestFormat::from_path(path)
            .ok_or_else(|| load_error("expected a .toml or .json file".into()))?;
        let raw = fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;

        let topology = self.parse(&raw, format).map_err(load_error)?;
        debug!(
            request_id = %topology.request_id(),
            cluster = %topology.cluster_name(),
            stacks = topology.stack_ids().len(),
            "loaded cluster request"
        );
        Ok(topology)
    }

    /// Parse a request held in memory.
    pub fn parse(&self, raw: &str, format: RequestFormat) -> Result<ClusterTopology, String> {
        let request: ClusterRequest = match format {
            RequestFormat::Toml => toml::from_str(raw).map_err(|e| e.to_string())?,
            RequestFormat::Json => serde_json::from_str(raw).map_err(|e| e.to_string())?,
        };
        request.into_topology()
    }
}
