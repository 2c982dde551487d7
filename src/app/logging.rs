//! Process-wide `tracing` subscriber installation.

use tracing_subscriber::{EnvFilter, fmt};

use crate::domain::AppError;
use crate::domain::config::{LogFormat, LoggingConfig};

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
pub fn init_logging(config: &LoggingConfig) -> Result<(), AppError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(config.level.trim()).map_err(|err| {
            AppError::config_error(format!("Invalid logging.level '{}': {err}", config.level))
        })?,
    };

    let builder = fmt::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stdout)
        .with_target(false)
        .with_thread_ids(false);

    let installed = match config.format {
        LogFormat::Json => builder.json().with_current_span(true).try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
    installed.map_err(|err| AppError::InternalError(format!("failed to install tracing subscriber: {err}")))
}
