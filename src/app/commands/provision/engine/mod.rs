//! Engine installation: place the server jar and render the final startup script.

mod fabric;
mod forge;
mod paper;

use std::path::PathBuf;

use crate::adapters::filesystem::copy_artifact;
use crate::app::ProvisionContext;
use crate::domain::config::ArtifactSource;
use crate::domain::launch::START_SCRIPT;
use crate::domain::{
    AppError, EngineVariant, ForgePhase, LaunchMode, ServerInstallation, StartupScriptParams,
};
use crate::ports::{Reporter, SecretGenerator, SystemOps, TemplateRenderer};

/// Startup scripts are run by `sh`, owner and group only.
pub const SCRIPT_MODE: u32 = 0o750;

/// Result of a successful engine installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOutcome {
    /// Jar the final startup script launches, relative to the installation root.
    pub jar: String,
    pub start_script: PathBuf,
    /// Phases walked by the Forge installer; empty for other engines.
    pub phases: Vec<ForgePhase>,
}

/// Install the requested engine. Every failure is an engine-install failure
/// naming the variant.
pub fn install<S, T, G, R>(
    ctx: &ProvisionContext<S, T, G, R>,
    installation: &ServerInstallation,
) -> Result<EngineOutcome, AppError>
where
    S: SystemOps,
    T: TemplateRenderer,
    G: SecretGenerator,
    R: Reporter,
{
    let variant = installation.request().engine();
    let outcome = match variant {
        EngineVariant::Paper => paper::install(ctx, installation),
        EngineVariant::Forge => forge::install(ctx, installation),
        EngineVariant::Fabric => fabric::install(ctx, installation),
    };
    let outcome = outcome.map_err(|cause| AppError::engine(variant, cause))?;
    tracing::info!(engine = %variant, jar = %outcome.jar, "engine installed");
    Ok(outcome)
}

/// Copy a configured artifact from the resources directory into the installation root.
fn stage_artifact<S, T, G, R>(
    ctx: &ProvisionContext<S, T, G, R>,
    installation: &ServerInstallation,
    source: &ArtifactSource,
    target: &str,
) -> Result<(), AppError>
where
    S: SystemOps,
    T: TemplateRenderer,
    G: SecretGenerator,
    R: Reporter,
{
    copy_artifact(
        &ctx.config().resource(&source.file),
        &installation.root().join(target),
        source.sha256.as_deref(),
    )
}

/// Render a startup script named `file_name` that launches `jar` in `mode`.
fn render_script<S, T, G, R>(
    ctx: &ProvisionContext<S, T, G, R>,
    installation: &ServerInstallation,
    jar: &str,
    mode: LaunchMode,
    file_name: &str,
) -> Result<PathBuf, AppError>
where
    S: SystemOps,
    T: TemplateRenderer,
    G: SecretGenerator,
    R: Reporter,
{
    let root = installation.root();
    let path = root.join(file_name);
    let params = StartupScriptParams::new(installation.request(), root, jar, mode);
    ctx.templates().render(&params, &path, SCRIPT_MODE)?;
    Ok(path)
}

/// Install a single-jar engine: stage it, then render the run-mode script.
fn install_single_jar<S, T, G, R>(
    ctx: &ProvisionContext<S, T, G, R>,
    installation: &ServerInstallation,
    source: &ArtifactSource,
    jar: &str,
) -> Result<EngineOutcome, AppError>
where
    S: SystemOps,
    T: TemplateRenderer,
    G: SecretGenerator,
    R: Reporter,
{
    stage_artifact(ctx, installation, source, jar)?;
    let start_script = render_script(ctx, installation, jar, LaunchMode::Run, START_SCRIPT)?;
    Ok(EngineOutcome { jar: jar.to_string(), start_script, phases: Vec::new() })
}
