//! Pure parse/validate for provisioner configuration (`config.toml`).

use crate::domain::{AppError, ProvisionerConfig};

/// Parse and validate provisioner configuration from TOML content.
pub fn parse_config_content(content: &str) -> Result<ProvisionerConfig, AppError> {
    let config: ProvisionerConfig = toml::from_str(content)
        .map_err(|err| AppError::config_error(format!("Malformed config.toml: {err}")))?;
    config.validate()?;
    Ok(config)
}
