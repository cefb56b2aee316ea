//! Configuration schema for updates-sync
//!
//! Syncer settings are stored at `~/.corda-updates/settings.conf` (TOML).
//! The node-level member configuration may point somewhere else.

use crate::artifact::ArtifactCoordinates;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Root syncer configuration handed to the external syncer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncerConfiguration {
    /// Directory the syncer places downloaded artifacts in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_dir: Option<PathBuf>,

    /// How to invoke the external syncer
    pub syncer: SyncerProcessConfig,

    /// Repositories to resolve from
    pub repositories: Vec<RepositoryConfig>,

    /// Artifacts covered by a full sync
    pub artifacts: Vec<ArtifactSelector>,
}

impl SyncerConfiguration {
    /// Check values serde cannot reject on its own
    pub fn validate(&self) -> Result<(), String> {
        if self.syncer.command.trim().is_empty() {
            return Err("[syncer].command must not be empty".to_string());
        }
        if self.syncer.timeout_secs == 0 {
            return Err("[syncer].timeout_secs must be at least 1".to_string());
        }
        Ok(())
    }
}

/// External syncer process settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncerProcessConfig {
    /// Program implementing the syncer
    pub command: String,

    /// Leading arguments placed before the operation name
    pub args: Vec<String>,

    /// Upper bound on a single sync or query
    pub timeout_secs: u64,

    /// Extra environment variables for the syncer process
    pub env: HashMap<String, String>,
}

impl Default for SyncerProcessConfig {
    fn default() -> Self {
        Self {
            command: "corda-updates".to_string(),
            args: vec![],
            timeout_secs: 600,
            env: HashMap::new(),
        }
    }
}

/// An artifact repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Short name used in metadata records
    pub name: String,

    /// Base URL
    pub url: String,

    /// Username for authenticated repositories
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Name of the environment variable holding the password
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_env: Option<String>,
}

/// One entry of the full-sync artifact list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactSelector {
    pub coordinates: ArtifactCoordinates,
}

/// Node-level member configuration
///
/// Only the override path for the syncer settings is read; everything else
/// in the file belongs to other node components and is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberConfiguration {
    /// Overrides the default settings location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updates_settings_path: Option<PathBuf>,
}
