use super::{EngineOutcome, install_single_jar};
use crate::app::ProvisionContext;
use crate::domain::engine::PAPER_JAR;
use crate::domain::{AppError, ServerInstallation};
use crate::ports::{Reporter, SecretGenerator, SystemOps, TemplateRenderer};

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
    install_single_jar(ctx, installation, &ctx.config().engines.paper, PAPER_JAR)
}
