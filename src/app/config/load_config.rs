//! Configuration file discovery and reading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::config::{parse_config_content, paths};
use crate::domain::{AppError, ProvisionerConfig};

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Path given with `--config` or the configuration environment variable.
    Explicit(PathBuf),
    /// The system-wide default file.
    System(PathBuf),
    /// No file; built-in defaults.
    Defaults,
}

/// Decide which configuration file, if any, to read.
pub fn resolve_config_source(explicit: Option<&Path>, system_default: &Path) -> ConfigSource {
    match explicit {
        Some(path) => ConfigSource::Explicit(path.to_path_buf()),
        None if system_default.is_file() => ConfigSource::System(system_default.to_path_buf()),
        None => ConfigSource::Defaults,
    }
}

/// Load configuration from an explicit path, the system default, or built-in defaults.
///
/// An explicit path must exist.
pub fn load_config(explicit: Option<&Path>) -> Result<ProvisionerConfig, AppError> {
    load_from(resolve_config_source(explicit, &paths::default_config()))
}

pub fn load_from(source: ConfigSource) -> Result<ProvisionerConfig, AppError> {
    match source {
        ConfigSource::Explicit(path) | ConfigSource::System(path) => {
            let content = fs::read_to_string(&path).map_err(|err| {
                AppError::config_error(format!("Cannot read {}: {err}", path.display()))
            })?;
            parse_config_content(&content).map_err(|err| match err {
                AppError::Configuration(message) => {
                    AppError::config_error(format!("{}: {message}", path.display()))
                }
                other => other,
            })
        }
        ConfigSource::Defaults => Ok(ProvisionerConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_path_wins_over_system_default() {
        let dir = TempDir::new().unwrap();
        let system = dir.path().join("system.toml");
        fs::write(&system, "").unwrap();
        let explicit = dir.path().join("explicit.toml");

        assert_eq!(
            resolve_config_source(Some(&explicit), &system),
            ConfigSource::Explicit(explicit.clone())
        );
        assert_eq!(resolve_config_source(None, &system), ConfigSource::System(system));
        assert_eq!(
            resolve_config_source(None, &dir.path().join("absent.toml")),
            ConfigSource::Defaults
        );
    }

    #[test]
    fn missing_explicit_file_is_a_configuration_error() {
        let dir = TempDir::new().unwrap();
        let err = load_from(ConfigSource::Explicit(dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn file_contents_are_parsed_and_errors_name_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "servers_root = \"/srv/minecraft\"\n").unwrap();
        let config = load_from(ConfigSource::Explicit(path.clone())).unwrap();
        assert_eq!(config.servers_root, PathBuf::from("/srv/minecraft"));

        fs::write(&path, "servers_root = 42\n").unwrap();
        let err = load_from(ConfigSource::Explicit(path)).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn defaults_need_no_file() {
        let config = load_from(ConfigSource::Defaults).unwrap();
        assert_eq!(config.servers_root, PathBuf::from("/servers"));
    }
}
