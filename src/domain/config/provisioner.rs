//! Provisioner configuration domain models.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::AppError;

/// Host-level configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProvisionerConfig {
    /// Parent of every `<owner>/<instance>` installation root.
    #[serde(default = "default_servers_root")]
    pub servers_root: PathBuf,
    /// Directory the service unit file is written to.
    #[serde(default = "default_unit_dir")]
    pub unit_dir: PathBuf,
    /// Directory holding the prepackaged engine artifacts.
    #[serde(default = "default_resources_dir")]
    pub resources_dir: PathBuf,
    /// Template directory. Templates compiled into the binary are used when unset.
    #[serde(default)]
    pub templates_dir: Option<PathBuf>,
    #[serde(default)]
    pub account: AccountConfig,
    #[serde(default)]
    pub engines: EngineArtifacts,
    #[serde(default)]
    pub secrets: SecretsConfig,
    #[serde(default)]
    pub tools: ToolPaths,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for ProvisionerConfig {
    fn default() -> Self {
        Self {
            servers_root: default_servers_root(),
            unit_dir: default_unit_dir(),
            resources_dir: default_resources_dir(),
            templates_dir: None,
            account: AccountConfig::default(),
            engines: EngineArtifacts::default(),
            secrets: SecretsConfig::default(),
            tools: ToolPaths::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ProvisionerConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        for (key, path) in [
            ("servers_root", &self.servers_root),
            ("unit_dir", &self.unit_dir),
            ("resources_dir", &self.resources_dir),
        ] {
            if !path.is_absolute() {
                return Err(AppError::config_error(format!(
                    "{key} must be an absolute path, got '{}'",
                    path.display()
                )));
            }
        }
        // Rendered verbatim into the startup script and the unit file.
        let plain =
            self.servers_root.to_str().is_some_and(|path| path.chars().all(is_plain_path_char));
        if !plain {
            return Err(AppError::config_error(format!(
                "servers_root may only contain letters, digits, '/', '.', '_' and '-', got '{}'",
                self.servers_root.display()
            )));
        }
        if let Some(dir) = &self.templates_dir
            && !dir.is_absolute()
        {
            return Err(AppError::config_error(format!(
                "templates_dir must be an absolute path, got '{}'",
                dir.display()
            )));
        }
        self.account.validate()?;
        self.engines.validate()?;
        self.secrets.validate()?;
        self.tools.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Resolve an engine artifact name against `resources_dir`.
    pub fn resource(&self, name: &str) -> PathBuf {
        self.resources_dir.join(name)
    }
}

fn is_plain_path_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '/' | '.' | '_' | '-')
}

fn default_servers_root() -> PathBuf {
    PathBuf::from("/servers")
}

fn default_unit_dir() -> PathBuf {
    PathBuf::from("/etc/systemd/system")
}

fn default_resources_dir() -> PathBuf {
    PathBuf::from("/opt/mcdeploy/resources")
}

/// What to do when the owner's OS account already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExistingAccountPolicy {
    /// Stop the run before anything is written into the installation root.
    #[default]
    Reject,
    /// Reuse the account and re-home it to the new installation root.
    Adopt,
}

/// OS account settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountConfig {
    /// Login shell; the default disables interactive login.
    #[serde(default = "default_shell")]
    pub shell: String,
    #[serde(default)]
    pub existing: ExistingAccountPolicy,
    /// Lowest uid `adopt` may take over, `UID_MIN` of `login.defs`. uid 0 is never adopted.
    #[serde(default = "default_min_uid")]
    pub min_uid: u32,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            shell: default_shell(),
            existing: ExistingAccountPolicy::default(),
            min_uid: default_min_uid(),
        }
    }
}

impl AccountConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if !Path::new(&self.shell).is_absolute() {
            return Err(AppError::config_error("account.shell must be an absolute path"));
        }
        if self.min_uid == 0 {
            return Err(AppError::config_error("account.min_uid must be greater than 0"));
        }
        Ok(())
    }
}

fn default_shell() -> String {
    "/usr/sbin/nologin".to_string()
}

fn default_min_uid() -> u32 {
    1000
}

/// A prepackaged artifact under `resources_dir`, optionally pinned by digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtifactSource {
    pub file: String,
    /// Lowercase hex SHA-256 the copied file must match.
    #[serde(default)]
    pub sha256: Option<String>,
}

impl ArtifactSource {
    fn named(file: &str) -> Self {
        Self { file: file.to_string(), sha256: None }
    }

    fn validate(&self, key: &str) -> Result<(), AppError> {
        if self.file.trim().is_empty() || self.file.contains('/') {
            return Err(AppError::config_error(format!(
                "engines.{key}.file must be a plain file name inside resources_dir"
            )));
        }
        if let Some(digest) = &self.sha256
            && (digest.len() != 64 || !digest.chars().all(|c| c.is_ascii_hexdigit()))
        {
            return Err(AppError::config_error(format!(
                "engines.{key}.sha256 must be 64 hexadecimal characters"
            )));
        }
        Ok(())
    }
}

/// Source artifacts per engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineArtifacts {
    #[serde(default = "default_paper")]
    pub paper: ArtifactSource,
    #[serde(default = "default_forge_installer")]
    pub forge_installer: ArtifactSource,
    #[serde(default = "default_fabric_launcher")]
    pub fabric_launcher: ArtifactSource,
}

impl Default for EngineArtifacts {
    fn default() -> Self {
        Self {
            paper: default_paper(),
            forge_installer: default_forge_installer(),
            fabric_launcher: default_fabric_launcher(),
        }
    }
}

impl EngineArtifacts {
    pub fn validate(&self) -> Result<(), AppError> {
        self.paper.validate("paper")?;
        self.forge_installer.validate("forge_installer")?;
        self.fabric_launcher.validate("fabric_launcher")?;
        Ok(())
    }
}

fn default_paper() -> ArtifactSource {
    ArtifactSource::named("paper.jar")
}

fn default_forge_installer() -> ArtifactSource {
    ArtifactSource::named("forgeInstaller.jar")
}

fn default_fabric_launcher() -> ArtifactSource {
    ArtifactSource::named("fabric-server-launch.jar")
}

/// Generated credential settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SecretsConfig {
    #[serde(default = "default_rcon_password_length")]
    pub rcon_password_length: usize,
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self { rcon_password_length: default_rcon_password_length() }
    }
}

impl SecretsConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.rcon_password_length < 12 {
            return Err(AppError::config_error(
                "secrets.rcon_password_length must be at least 12",
            ));
        }
        Ok(())
    }
}

fn default_rcon_password_length() -> usize {
    24
}

/// Programs invoked for privileged host changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolPaths {
    #[serde(default = "default_ufw")]
    pub ufw: String,
    #[serde(default = "default_useradd")]
    pub useradd: String,
    #[serde(default = "default_usermod")]
    pub usermod: String,
    #[serde(default = "default_chown")]
    pub chown: String,
    #[serde(default = "default_chmod")]
    pub chmod: String,
    #[serde(default = "default_systemctl")]
    pub systemctl: String,
    #[serde(default = "default_sh")]
    pub sh: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            ufw: default_ufw(),
            useradd: default_useradd(),
            usermod: default_usermod(),
            chown: default_chown(),
            chmod: default_chmod(),
            systemctl: default_systemctl(),
            sh: default_sh(),
        }
    }
}

impl ToolPaths {
    pub fn validate(&self) -> Result<(), AppError> {
        for (key, value) in [
            ("ufw", &self.ufw),
            ("useradd", &self.useradd),
            ("usermod", &self.usermod),
            ("chown", &self.chown),
            ("chmod", &self.chmod),
            ("systemctl", &self.systemctl),
            ("sh", &self.sh),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::config_error(format!("tools.{key} must not be empty")));
            }
        }
        Ok(())
    }
}

fn default_ufw() -> String {
    "ufw".to_string()
}

fn default_useradd() -> String {
    "useradd".to_string()
}

fn default_usermod() -> String {
    "usermod".to_string()
}

fn default_chown() -> String {
    "chown".to_string()
}

fn default_chmod() -> String {
    "chmod".to_string()
}

fn default_systemctl() -> String {
    "/bin/systemctl".to_string()
}

fn default_sh() -> String {
    "sh".to_string()
}

/// Log output encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

/// Logging settings. `RUST_LOG` overrides `level` when set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), format: LogFormat::default() }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        const LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];
        if !LEVELS.iter().any(|level| level.eq_ignore_ascii_case(self.level.trim())) {
            return Err(AppError::config_error(format!(
                "logging.level must be one of {}, got '{}'",
                LEVELS.join(", "),
                self.level
            )));
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
