//! Integration tests for updates-sync

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::Path;
    use tempfile::TempDir;

    /// Binary with HOME pointed at a scratch directory
    fn updates_sync(home: &Path) -> Command {
        let mut cmd = cargo_bin_cmd!("updates-sync");
        cmd.env("HOME", home).env_remove("UPDATES_MEMBER_CONFIG");
        cmd
    }

    #[cfg(unix)]
    fn write_shell_settings(dir: &Path, script: &str) -> std::path::PathBuf {
        let path = dir.join("explicit.conf");
        let script = script.replace('\\', "\\\\").replace('"', "\\\"");
        std::fs::write(
            &path,
            format!(
                "[syncer]\ncommand = \"sh\"\nargs = [\"-c\", \"{}\", \"syncer\"]\ntimeout_secs = 30\n",
                script
            ),
        )
        .unwrap();
        path
    }

    #[test]
    fn help_displays() {
        let home = TempDir::new().unwrap();
        updates_sync(home.path())
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("artifact syncer"));
    }

    #[test]
    fn version_displays() {
        let home = TempDir::new().unwrap();
        updates_sync(home.path())
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("updates-sync"));
    }

    #[test]
    fn config_path_defaults_to_home() {
        let home = TempDir::new().unwrap();
        updates_sync(home.path())
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains(".corda-updates"))
            .stdout(predicate::str::contains("settings.conf"));
    }

    #[test]
    fn member_config_overrides_path() {
        let home = TempDir::new().unwrap();
        let node_conf = home.path().join("node.conf");
        std::fs::write(
            &node_conf,
            "updates_settings_path = \"/etc/corda/updates.conf\"\n",
        )
        .unwrap();

        updates_sync(home.path())
            .args(["config", "path", "--member-config"])
            .arg(&node_conf)
            .assert()
            .success()
            .stdout(predicate::str::contains("/etc/corda/updates.conf"));
    }

    #[test]
    fn sync_without_settings_fails() {
        let home = TempDir::new().unwrap();
        updates_sync(home.path())
            .arg("sync")
            .assert()
            .failure()
            .stderr(predicate::str::contains("configuration not found"))
            .stderr(predicate::str::contains("Hint:"));
    }

    #[test]
    fn config_init_then_show() {
        let home = TempDir::new().unwrap();
        updates_sync(home.path())
            .args(["config", "init"])
            .assert()
            .success();

        assert!(home
            .path()
            .join(".corda-updates")
            .join("settings.conf")
            .exists());

        updates_sync(home.path())
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[syncer]"))
            .stdout(predicate::str::contains("corda-updates"));
    }

    #[test]
    fn query_rejects_bad_coordinates() {
        let home = TempDir::new().unwrap();
        updates_sync(home.path())
            .args(["query", "net.corda:corda-finance"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid artifact coordinates"));
    }

    #[cfg(unix)]
    #[test]
    fn sync_with_explicit_settings() {
        let home = TempDir::new().unwrap();
        let settings = write_shell_settings(
            home.path(),
            r#"cat > /dev/null; printf '[{"group":"net.corda","name":"corda-finance","version":"4.3","location":"/r/f.jar"}]'"#,
        );

        updates_sync(home.path())
            .args(["sync", "--format", "plain", "--settings"])
            .arg(&settings)
            .assert()
            .success()
            .stdout(predicate::str::contains("net.corda:corda-finance:4.3"));
    }

    #[cfg(unix)]
    #[test]
    fn queued_query_returns_json() {
        let home = TempDir::new().unwrap();
        let settings = write_shell_settings(
            home.path(),
            r#"cat > /dev/null; printf '[{"group":"g","name":"a","version":"1.5","location":"/r/a.jar","repository":"r3"}]'"#,
        );

        updates_sync(home.path())
            .args(["query", "g:a:[1.0,2.0)", "--queued", "--format", "json", "--settings"])
            .arg(&settings)
            .assert()
            .success()
            .stdout(predicate::str::contains("\"repository\": \"r3\""));
    }

    #[cfg(unix)]
    #[test]
    fn syncer_failure_is_reported() {
        let home = TempDir::new().unwrap();
        let settings = write_shell_settings(
            home.path(),
            "cat > /dev/null; echo 'repository unreachable' >&2; exit 4",
        );

        updates_sync(home.path())
            .args(["sync", "--settings"])
            .arg(&settings)
            .assert()
            .failure()
            .stderr(predicate::str::contains("repository unreachable"));
    }
}
