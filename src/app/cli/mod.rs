//! CLI adapter.

mod legacy;

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use crate::adapters::TracingReporter;
use crate::app::api;
use crate::app::config::load_config;
use crate::app::logging::init_logging;
use crate::domain::config::LoggingConfig;
use crate::domain::{AppError, ProvisionFailure, ProvisionInput, ProvisionStage};
use crate::ports::{ProvisionEvent, Reporter};

pub use legacy::normalize_legacy_flags;

#[derive(Parser, Debug)]
#[command(name = "mcdeploy")]
#[command(version)]
#[command(
    about = "Provision a Minecraft server instance as a supervised service",
    long_about = None
)]
struct Cli {
    /// Owner identifier, also the OS account name
    #[arg(long = "userID", visible_alias = "user-id", value_name = "ID")]
    user_id: String,
    /// Server instance identifier
    #[arg(long = "userServerID", visible_alias = "server-id", value_name = "ID")]
    server_id: String,
    /// Engine code: 1 = Paper, 2 = Forge, 3 = Fabric
    #[arg(long = "userServerType", visible_alias = "server-type", value_name = "CODE")]
    server_type: u8,
    /// Game port; RCON and query use the next two ports
    #[arg(long = "userServerPort", visible_alias = "port", value_name = "PORT")]
    port: u32,
    /// Initial JVM heap, e.g. 1G
    #[arg(long = "userServerXMS", visible_alias = "xms", value_name = "SIZE")]
    xms: String,
    /// Maximum JVM heap, e.g. 2G
    #[arg(long = "userServerXMX", visible_alias = "xmx", value_name = "SIZE")]
    xmx: String,
    /// Processor count the JVM is told to use
    #[arg(long = "userServerThreads", visible_alias = "threads", value_name = "N")]
    threads: u32,
    /// Configuration file
    #[arg(long, env = crate::domain::config::paths::CONFIG_ENV, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Cli {
    fn input(&self) -> ProvisionInput {
        ProvisionInput {
            user_id: self.user_id.clone(),
            server_id: self.server_id.clone(),
            server_type: self.server_type,
            port: self.port,
            xms: self.xms.clone(),
            xmx: self.xmx.clone(),
            threads: self.threads,
        }
    }
}

/// Entry point for the CLI. Returns the process exit code.
pub fn run() -> i32 {
    run_from(std::env::args_os())
}

pub fn run_from<I>(args: I) -> i32
where
    I: IntoIterator<Item = OsString>,
{
    let cli = match Cli::try_parse_from(normalize_legacy_flags(args)) {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            if err.use_stderr() {
                let reason = usage_reason(&err.to_string());
                report_early_failure(&ProvisionFailure::new(
                    ProvisionStage::Validated,
                    AppError::validation("arguments", reason),
                ));
            }
            return err.exit_code();
        }
    };

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            let failure = ProvisionFailure::new(ProvisionStage::Validated, err);
            report_early_failure(&failure);
            eprintln!("Error: {}", failure);
            return failure.exit_code();
        }
    };

    if let Err(err) = init_logging(&config.logging) {
        eprintln!("Error: {}", err);
        return err.class().exit_code();
    }

    match api::provision(&cli.input(), &config) {
        Ok(report) => match serde_json::to_string(&report) {
            Ok(json) => {
                println!("{json}");
                0
            }
            Err(err) => {
                let err = AppError::InternalError(format!("failed to serialize report: {err}"));
                eprintln!("Error: {}", err);
                err.class().exit_code()
            }
        },
        Err(failure) => {
            eprintln!("Error: {}", failure);
            failure.exit_code()
        }
    }
}

/// Emit the failure record for a run that ended before its configuration was usable.
fn report_early_failure(failure: &ProvisionFailure) {
    if init_logging(&LoggingConfig::default()).is_ok() {
        TracingReporter.report(ProvisionEvent::Failed(failure));
    }
}

/// First line of a clap error without its `error:` prefix.
fn usage_reason(rendered: &str) -> String {
    let line = rendered.lines().next().unwrap_or_default();
    line.strip_prefix("error:").unwrap_or(line).trim().to_string()
}
