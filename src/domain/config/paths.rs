use std::path::PathBuf;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV: &str = "MCDEPLOY_CONFIG";

/// `/etc/mcdeploy/config.toml`, read when present and no explicit path is given.
pub fn default_config() -> PathBuf {
    PathBuf::from("/etc/mcdeploy/config.toml")
}
