//! Template parameter records for the startup script and the service unit.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::ProvisionRequest;

/// How the startup script invokes the jar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    /// One-shot Forge installer invocation (`--installServer`).
    Install,
    /// Headless server run (`nogui`).
    Run,
}

impl LaunchMode {
    pub fn option(self) -> &'static str {
        match self {
            LaunchMode::Install => "--installServer",
            LaunchMode::Run => "nogui",
        }
    }
}

/// Values substituted into the startup script template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartupScriptParams {
    pub xms: String,
    pub xmx: String,
    pub threads: u32,
    pub jar: String,
    pub option: String,
    /// Directory the script changes into before launching.
    pub working_directory: PathBuf,
}

impl StartupScriptParams {
    pub fn new(request: &ProvisionRequest, root: &Path, jar: &str, mode: LaunchMode) -> Self {
        Self {
            xms: request.xms().to_string(),
            xmx: request.xmx().to_string(),
            threads: request.threads(),
            jar: jar.to_string(),
            option: mode.option().to_string(),
            working_directory: root.to_path_buf(),
        }
    }
}

/// Values substituted into the service unit template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceUnitParams {
    pub owner_id: String,
    pub instance_id: String,
    pub working_directory: PathBuf,
    pub start_script: PathBuf,
}

impl ServiceUnitParams {
    pub fn new(request: &ProvisionRequest, root: &Path) -> Self {
        Self {
            owner_id: request.owner_id().to_string(),
            instance_id: request.instance_id().to_string(),
            working_directory: root.to_path_buf(),
            start_script: root.join(START_SCRIPT),
        }
    }
}

/// Final startup script, executed by the service unit.
pub const START_SCRIPT: &str = "start.sh";

/// EULA acceptance file read by the server on boot.
pub const EULA_FILE: &str = "eula.txt";

/// Server configuration file.
pub const SERVER_PROPERTIES: &str = "server.properties";
