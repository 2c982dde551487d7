use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::adapters::{MinijinjaTemplateRenderer, TemplateSource};
use crate::app::ProvisionContext;
use crate::domain::{ProvisionInput, ProvisionerConfig};
use crate::testing::{FakeSystemOps, FixedSecretGenerator, RecordingReporter};

pub type TestContext =
    ProvisionContext<FakeSystemOps, MinijinjaTemplateRenderer, FixedSecretGenerator, RecordingReporter>;

/// Temporary stand-in for the host filesystem: servers root, unit directory,
/// and a resources directory holding every engine artifact.
pub struct TestHost {
    dir: TempDir,
}

impl TestHost {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        for sub in ["servers", "units", "resources"] {
            fs::create_dir(dir.path().join(sub)).unwrap();
        }
        let resources = dir.path().join("resources");
        fs::write(resources.join("paper.jar"), b"paper").unwrap();
        fs::write(resources.join("forgeInstaller.jar"), b"forge-installer").unwrap();
        fs::write(resources.join("fabric-server-launch.jar"), b"fabric").unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn servers_root(&self) -> PathBuf {
        self.path().join("servers")
    }

    pub fn unit_dir(&self) -> PathBuf {
        self.path().join("units")
    }

    pub fn config(&self) -> ProvisionerConfig {
        ProvisionerConfig {
            servers_root: self.servers_root(),
            unit_dir: self.unit_dir(),
            resources_dir: self.path().join("resources"),
            ..ProvisionerConfig::default()
        }
    }

    pub fn context(&self, system: FakeSystemOps) -> TestContext {
        self.context_with(self.config(), system)
    }

    pub fn context_with(&self, config: ProvisionerConfig, system: FakeSystemOps) -> TestContext {
        ProvisionContext::new(
            config,
            system,
            MinijinjaTemplateRenderer::new(TemplateSource::Embedded),
            FixedSecretGenerator::default(),
            RecordingReporter::new(),
        )
    }
}

/// `alice`/`s1` on port 25565 with 1G/2G heap and 4 threads.
pub fn input(server_type: u8) -> ProvisionInput {
    ProvisionInput {
        user_id: "alice".to_string(),
        server_id: "s1".to_string(),
        server_type,
        port: 25565,
        xms: "1G".to_string(),
        xmx: "2G".to_string(),
        threads: 4,
    }
}
