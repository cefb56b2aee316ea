//! Syncer backed by an external process
//!
//! Runs `<command> <args...> sync` or `<command> <args...> query <coords>`,
//! writes the configuration to the child's stdin as JSON and reads a JSON
//! array of artifact metadata from its stdout.

use crate::artifact::{ArtifactCoordinates, ArtifactMetadata};
use crate::config::SyncerConfiguration;
use crate::error::{SyncerError, SyncerResult};
use crate::syncer::{ArtifactSyncer, SyncerFactory};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

/// Syncer that shells out to the configured command
pub struct CommandSyncer {
    config: SyncerConfiguration,
}

impl CommandSyncer {
    /// Create a syncer for one configuration
    pub fn new(config: SyncerConfiguration) -> Self {
        Self { config }
    }

    /// Execute one syncer operation and parse its report
    async fn exec(&self, operation: &[&str]) -> SyncerResult<Vec<ArtifactMetadata>> {
        let process = &self.config.syncer;
        let args: Vec<&str> = process
            .args
            .iter()
            .map(String::as_str)
            .chain(operation.iter().copied())
            .collect();
        let command_line = format!("{} {}", process.command, args.join(" "));

        debug!("Executing: {}", command_line);

        let payload = serde_json::to_vec(&self.config)?;

        let mut child = Command::new(&process.command)
            .args(&args)
            .envs(&process.env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| SyncerError::command_failed(&command_line, e))?;

        let stdin = child.stdin.take();
        let run = async {
            if let Some(mut stdin) = stdin {
                // A syncer that ignores its input may exit before we finish writing
                if let Err(e) = stdin.write_all(&payload).await {
                    if e.kind() != ErrorKind::BrokenPipe {
                        return Err(SyncerError::io(
                            format!("writing settings to {}", command_line),
                            e,
                        ));
                    }
                }
            }
            child
                .wait_with_output()
                .await
                .map_err(|e| SyncerError::command_failed(&command_line, e))
        };

        // Dropping `run` on timeout drops the child, which kills it
        let limit = Duration::from_secs(process.timeout_secs);
        let outcome = tokio::time::timeout(limit, run).await;
        let output = match outcome {
            Ok(result) => result?,
            Err(_) => {
                warn!(
                    "Syncer exceeded {}s, killing: {}",
                    process.timeout_secs, command_line
                );
                return Err(SyncerError::SyncerTimeout {
                    command: command_line,
                    secs: process.timeout_secs,
                });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SyncerError::command_exec(command_line, stderr.trim()));
        }

        let artifacts: Vec<ArtifactMetadata> = serde_json::from_slice(&output.stdout)
            .map_err(|e| SyncerError::SyncerOutput(format!("{}: {}", command_line, e)))?;

        debug!("{} reported {} artifacts", command_line, artifacts.len());
        Ok(artifacts)
    }
}

#[async_trait]
impl ArtifactSyncer for CommandSyncer {
    async fn sync(&self) -> SyncerResult<Vec<ArtifactMetadata>> {
        self.exec(&["sync"]).await
    }

    async fn query(
        &self,
        coordinates: &ArtifactCoordinates,
    ) -> SyncerResult<Vec<ArtifactMetadata>> {
        let coordinates = coordinates.to_string();
        self.exec(&["query", &coordinates]).await
    }

    fn name(&self) -> &'static str {
        "command"
    }
}

/// Factory producing [`CommandSyncer`] instances
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandSyncerFactory;

impl SyncerFactory for CommandSyncerFactory {
    fn create(&self, config: &SyncerConfiguration) -> SyncerResult<Box<dyn ArtifactSyncer>> {
        Ok(Box::new(CommandSyncer::new(config.clone())))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::config::RepositoryConfig;

    /// Configuration that runs `script` under `sh -c`; `$1` is the operation
    fn shell_config(script: &str) -> SyncerConfiguration {
        let mut config = SyncerConfiguration::default();
        config.syncer.command = "sh".to_string();
        config.syncer.args = vec!["-c".to_string(), script.to_string(), "syncer".to_string()];
        config.syncer.timeout_secs = 10;
        config
    }

    const REPORT: &str = r#"[{"group":"net.corda","name":"a","version":"1.0","location":"/r/a.jar"},{"group":"net.corda","name":"b","version":"2.0","location":"/r/b.jar","repository":"r3"}]"#;

    #[tokio::test]
    async fn sync_parses_report() {
        let script = format!("cat > /dev/null; printf '%s' '{}'", REPORT);
        let syncer = CommandSyncer::new(shell_config(&script));

        let artifacts = syncer.sync().await.unwrap();
        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[0].name, "a");
        assert_eq!(artifacts[1].repository.as_deref(), Some("r3"));
    }

    #[tokio::test]
    async fn query_passes_coordinates() {
        let script = r#"cat > /dev/null; [ "$1" = query ] || exit 3; printf '[{"group":"g","name":"a","version":"%s","location":"x"}]' "$2""#;
        let syncer = CommandSyncer::new(shell_config(script));

        let coordinates = ArtifactCoordinates::parse("g:a:[1.0,2.0)").unwrap();
        let artifacts = syncer.query(&coordinates).await.unwrap();
        assert_eq!(artifacts[0].version, "g:a:[1.0,2.0)");
    }

    #[tokio::test]
    async fn settings_arrive_on_stdin() {
        let script = r#"grep -q '"command":"sh"' && printf '[]'"#;
        let syncer = CommandSyncer::new(shell_config(script));

        let artifacts = syncer.sync().await.unwrap();
        assert!(artifacts.is_empty());
    }

    #[tokio::test]
    async fn extra_env_is_set() {
        let mut config = shell_config(r#"cat > /dev/null; [ "$SYNC_MARKER" = on ] && printf '[]'"#);
        config.syncer.env.insert("SYNC_MARKER".to_string(), "on".to_string());

        assert!(CommandSyncer::new(config).sync().await.is_ok());
    }

    #[tokio::test]
    async fn non_zero_exit_carries_stderr() {
        let syncer = CommandSyncer::new(shell_config("cat > /dev/null; echo 'repo unreachable' >&2; exit 2"));

        let err = syncer.sync().await.unwrap_err();
        match err {
            SyncerError::CommandExecution { stderr, .. } => assert_eq!(stderr, "repo unreachable"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn garbage_output_is_rejected() {
        let syncer = CommandSyncer::new(shell_config("cat > /dev/null; echo 'done'"));
        assert!(matches!(
            syncer.sync().await.unwrap_err(),
            SyncerError::SyncerOutput(_)
        ));
    }

    #[tokio::test]
    async fn missing_command_fails_to_spawn() {
        let mut config = SyncerConfiguration::default();
        config.syncer.command = "/nonexistent/updates-syncer-binary".to_string();

        assert!(matches!(
            CommandSyncer::new(config).sync().await.unwrap_err(),
            SyncerError::CommandFailed { .. }
        ));
    }

    #[tokio::test]
    async fn slow_syncer_times_out() {
        let mut config = shell_config("cat > /dev/null; exec sleep 30");
        config.syncer.timeout_secs = 1;

        assert!(matches!(
            CommandSyncer::new(config).sync().await.unwrap_err(),
            SyncerError::SyncerTimeout { secs: 1, .. }
        ));
    }

    #[tokio::test]
    async fn timeout_covers_unread_settings() {
        let mut config = shell_config("exec sleep 30");
        config.syncer.timeout_secs = 1;
        // Well past a pipe buffer, so the write blocks on a child that never reads
        config.repositories = (0..3000)
            .map(|i| RepositoryConfig {
                name: format!("mirror-{}", i),
                url: format!("https://repo{}.example.com/releases", i),
                username: None,
                password_env: None,
            })
            .collect();

        let started = std::time::Instant::now();
        let err = CommandSyncer::new(config).sync().await.unwrap_err();

        assert!(matches!(err, SyncerError::SyncerTimeout { secs: 1, .. }));
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn factory_builds_from_borrowed_config() {
        let config = shell_config("printf '[]'");
        let syncer = CommandSyncerFactory.create(&config).unwrap();
        assert_eq!(syncer.name(), "command");
        assert_eq!(config.syncer.command, "sh");
    }
}
