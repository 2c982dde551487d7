use super::{EngineOutcome, install_single_jar};
use crate::app::ProvisionContext;
use crate::domain::engine::FABRIC_LAUNCHER_JAR;
use crate::domain::{AppError, ServerInstallation};
use crate::ports::{Reporter, SecretGenerator, SystemOps, TemplateRenderer};

/// Fabric ships a self-contained server launcher; no installer run is needed.
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
    install_single_jar(ctx, installation, &ctx.config().engines.fabric_launcher, FABRIC_LAUNCHER_JAR)
}
