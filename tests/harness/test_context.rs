//! Shared testing harness for `mcdeploy` integration tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated host layout plus a configuration file pointing into it.
pub(crate) struct TestContext {
    root: TempDir,
}

impl TestContext {
    /// Create a new isolated environment with an empty configuration.
    pub(crate) fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        for dir in ["servers", "units", "resources"] {
            fs::create_dir_all(root.path().join(dir)).expect("Failed to create test directory");
        }
        let ctx = Self { root };
        ctx.write_config("");
        ctx
    }

    pub(crate) fn root(&self) -> &Path {
        self.root.path()
    }

    pub(crate) fn servers_root(&self) -> PathBuf {
        self.root().join("servers")
    }

    pub(crate) fn unit_dir(&self) -> PathBuf {
        self.root().join("units")
    }

    pub(crate) fn resources_dir(&self) -> PathBuf {
        self.root().join("resources")
    }

    pub(crate) fn config_path(&self) -> PathBuf {
        self.root().join("config.toml")
    }

    /// Write `config.toml` with the directory keys pointing into the sandbox,
    /// followed by `extra`.
    pub(crate) fn write_config(&self, extra: &str) {
        let content = format!(
            "servers_root = \"{}\"\nunit_dir = \"{}\"\nresources_dir = \"{}\"\n{extra}",
            self.servers_root().display(),
            self.unit_dir().display(),
            self.resources_dir().display(),
        );
        fs::write(self.config_path(), content).expect("Failed to write config.toml");
    }

    /// Overwrite `config.toml` verbatim.
    pub(crate) fn write_raw_config(&self, content: &str) {
        fs::write(self.config_path(), content).expect("Failed to write config.toml");
    }

    /// Command for the binary, isolated from the caller's environment.
    pub(crate) fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("mcdeploy").expect("Failed to locate mcdeploy binary");
        cmd.current_dir(self.root()).env_remove("MCDEPLOY_CONFIG").env_remove("RUST_LOG");
        cmd
    }

    /// Command with `--config` and the legacy request flags for `alice`/`s1`.
    ///
    /// `overrides` replaces the value of a flag by name, e.g. `("userServerPort", "65534")`.
    pub(crate) fn provision(&self, overrides: &[(&str, &str)]) -> Command {
        let mut cmd = self.cli();
        cmd.arg("--config").arg(self.config_path());
        for (flag, default) in DEFAULT_REQUEST {
            let value = overrides
                .iter()
                .find(|(name, _)| *name == flag)
                .map(|(_, value)| *value)
                .unwrap_or(default);
            cmd.arg(format!("-{flag}")).arg(value);
        }
        cmd
    }

    /// True when nothing has been written under the servers root or unit directory.
    pub(crate) fn untouched(&self) -> bool {
        let empty = |dir: PathBuf| fs::read_dir(dir).map(|mut it| it.next().is_none()).unwrap_or(false);
        empty(self.servers_root()) && empty(self.unit_dir())
    }
}

/// The `provisioning failed` record among the JSON log lines a run printed to stdout.
pub(crate) fn failure_record(stdout: &[u8]) -> serde_json::Value {
    let stdout = String::from_utf8(stdout.to_vec()).expect("stdout is UTF-8");
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str::<serde_json::Value>(line).expect("log line is JSON"))
        .find(|record| record["fields"]["message"] == "provisioning failed")
        .expect("failure record")
}

const DEFAULT_REQUEST: [(&str, &str); 7] = [
    ("userID", "alice"),
    ("userServerID", "s1"),
    ("userServerType", "1"),
    ("userServerPort", "25565"),
    ("userServerXMS", "1G"),
    ("userServerXMX", "2G"),
    ("userServerThreads", "4"),
];
