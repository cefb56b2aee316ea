//! Configuration management for updates-sync

pub mod schema;

pub use schema::{
    ArtifactSelector, MemberConfiguration, RepositoryConfig, SyncerConfiguration,
    SyncerProcessConfig,
};

use crate::error::{SyncerError, SyncerResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Where a resolved configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Supplied directly by the caller
    Explicit,
    /// Loaded from a settings file
    File(PathBuf),
}

/// Resolves the syncer configuration for each operation
///
/// Lookup order: explicit configuration, then the member configuration
/// override path, then the default settings path.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    override_path: Option<PathBuf>,
    default_path: PathBuf,
}

impl ConfigResolver {
    /// Create a resolver using the default settings path
    pub fn new(member: &MemberConfiguration) -> Self {
        Self::with_default_path(member, Self::default_settings_path())
    }

    /// Create a resolver with a custom default path
    pub fn with_default_path(member: &MemberConfiguration, default_path: PathBuf) -> Self {
        Self {
            override_path: member.updates_settings_path.clone(),
            default_path,
        }
    }

    /// Get the default settings file path
    pub fn default_settings_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".corda-updates")
            .join("settings.conf")
    }

    /// Path a file-based lookup would use, ignoring whether it exists
    pub fn settings_path(&self) -> &Path {
        self.override_path
            .as_deref()
            .unwrap_or(self.default_path.as_path())
    }

    /// Resolve the configuration for one operation
    pub async fn resolve(
        &self,
        explicit: Option<SyncerConfiguration>,
    ) -> SyncerResult<(SyncerConfiguration, ConfigSource)> {
        if let Some(config) = explicit {
            debug!("Using explicitly supplied syncer configuration");
            return Ok((config, ConfigSource::Explicit));
        }

        let path = self.settings_path();
        if !path.exists() {
            return Err(SyncerError::ConfigNotFound(path.to_path_buf()));
        }

        let config = load_settings(path).await?;
        Ok((config, ConfigSource::File(path.to_path_buf())))
    }

    /// Write a configuration to the resolved settings path
    pub async fn save(&self, config: &SyncerConfiguration) -> SyncerResult<()> {
        save_settings(self.settings_path(), config).await
    }
}

/// Load syncer settings from a specific file
pub async fn load_settings(path: &Path) -> SyncerResult<SyncerConfiguration> {
    debug!("Loading syncer settings from {}", path.display());

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| SyncerError::io(format!("reading settings from {}", path.display()), e))?;

    let config: SyncerConfiguration =
        toml::from_str(&content).map_err(|e| SyncerError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    config.validate().map_err(|reason| SyncerError::ConfigInvalid {
        path: path.to_path_buf(),
        reason,
    })?;

    Ok(config)
}

/// Save syncer settings, creating the parent directory
pub async fn save_settings(path: &Path, config: &SyncerConfiguration) -> SyncerResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| SyncerError::ConfigDirCreate {
                path: parent.to_path_buf(),
                source: e,
            })?;
    }

    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)
        .await
        .map_err(|e| SyncerError::io(format!("writing settings to {}", path.display()), e))?;

    info!("Syncer settings saved to {}", path.display());
    Ok(())
}

/// Load the node-level member configuration
///
/// A missing file means no override.
pub async fn load_member_config(path: Option<&Path>) -> SyncerResult<MemberConfiguration> {
    let Some(path) = path else {
        return Ok(MemberConfiguration::default());
    };

    if !path.exists() {
        debug!("Member config {} not found, using defaults", path.display());
        return Ok(MemberConfiguration::default());
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| SyncerError::io(format!("reading member config {}", path.display()), e))?;

    toml::from_str(&content).map_err(|e| SyncerError::ConfigInvalid {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn resolver_in(temp: &TempDir, member: &MemberConfiguration) -> ConfigResolver {
        ConfigResolver::with_default_path(member, temp.path().join("settings.conf"))
    }

    #[tokio::test]
    async fn missing_everything_is_config_not_found() {
        let temp = TempDir::new().unwrap();
        let resolver = resolver_in(&temp, &MemberConfiguration::default());

        let err = resolver.resolve(None).await.unwrap_err();
        match err {
            SyncerError::ConfigNotFound(path) => assert_eq!(path, temp.path().join("settings.conf")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn explicit_config_skips_file_lookup() {
        let temp = TempDir::new().unwrap();
        // Neither the override nor the default exists
        let member = MemberConfiguration {
            updates_settings_path: Some(temp.path().join("missing.conf")),
        };
        let resolver = resolver_in(&temp, &member);

        let mut explicit = SyncerConfiguration::default();
        explicit.syncer.command = "custom-syncer".to_string();

        let (config, source) = resolver.resolve(Some(explicit.clone())).await.unwrap();
        assert_eq!(config, explicit);
        assert_eq!(source, ConfigSource::Explicit);
    }

    #[tokio::test]
    async fn override_path_wins_over_default() {
        let temp = TempDir::new().unwrap();
        let override_path = temp.path().join("node").join("updates.conf");

        let mut from_default = SyncerConfiguration::default();
        from_default.syncer.command = "default-syncer".to_string();
        save_settings(&temp.path().join("settings.conf"), &from_default)
            .await
            .unwrap();

        let mut from_override = SyncerConfiguration::default();
        from_override.syncer.command = "override-syncer".to_string();
        save_settings(&override_path, &from_override).await.unwrap();

        let member = MemberConfiguration {
            updates_settings_path: Some(override_path.clone()),
        };
        let (config, source) = resolver_in(&temp, &member).resolve(None).await.unwrap();

        assert_eq!(config.syncer.command, "override-syncer");
        assert_eq!(source, ConfigSource::File(override_path));
    }

    #[tokio::test]
    async fn missing_override_does_not_fall_back() {
        let temp = TempDir::new().unwrap();
        save_settings(&temp.path().join("settings.conf"), &SyncerConfiguration::default())
            .await
            .unwrap();

        let member = MemberConfiguration {
            updates_settings_path: Some(temp.path().join("gone.conf")),
        };
        let err = resolver_in(&temp, &member).resolve(None).await.unwrap_err();
        assert!(matches!(err, SyncerError::ConfigNotFound(_)));
    }

    #[tokio::test]
    async fn malformed_settings_are_invalid() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.conf");
        std::fs::write(&path, "[syncer\ncommand = ").unwrap();

        let err = resolver_in(&temp, &MemberConfiguration::default())
            .resolve(None)
            .await
            .unwrap_err();
        assert!(matches!(err, SyncerError::ConfigInvalid { .. }));
    }

    #[tokio::test]
    async fn zero_timeout_is_rejected_on_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.conf");
        std::fs::write(&path, "[syncer]\ncommand = \"syncer\"\ntimeout_secs = 0\n").unwrap();

        let err = resolver_in(&temp, &MemberConfiguration::default())
            .resolve(None)
            .await
            .unwrap_err();
        match err {
            SyncerError::ConfigInvalid { path: bad, reason } => {
                assert_eq!(bad, path);
                assert!(reason.contains("timeout_secs"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn member_config_missing_file_means_no_override() {
        let temp = TempDir::new().unwrap();
        let member = load_member_config(Some(&temp.path().join("node.conf")))
            .await
            .unwrap();
        assert_eq!(member, MemberConfiguration::default());

        let member = load_member_config(None).await.unwrap();
        assert_eq!(member.updates_settings_path, None);
    }

    #[test]
    fn default_path_is_under_corda_updates() {
        let path = ConfigResolver::default_settings_path();
        assert!(path.ends_with(".corda-updates/settings.conf"));
    }
}
