//! API facade: wires the production adapters into a context and runs the
//! provisioning state machine.

use crate::adapters::{CommandSystemOps, MinijinjaTemplateRenderer, OsSecretGenerator, TracingReporter};
use crate::app::ProvisionContext;
use crate::app::commands::provision;
use crate::domain::{
    ProvisionFailure, ProvisionInput, ProvisionReport, ProvisionStage, ProvisionerConfig,
};
use crate::ports::{Reporter, SecretGenerator, SystemOps, TemplateRenderer};

/// Context backed by the host's command-line tools.
pub type HostContext =
    ProvisionContext<CommandSystemOps, MinijinjaTemplateRenderer, OsSecretGenerator, TracingReporter>;

/// Build the production context for `config`.
pub fn host_context(config: &ProvisionerConfig) -> HostContext {
    ProvisionContext::new(
        config.clone(),
        CommandSystemOps::new(config.tools.clone()),
        MinijinjaTemplateRenderer::from_config(config.templates_dir.as_deref()),
        OsSecretGenerator,
        TracingReporter,
    )
}

/// Provision one server instance on this host.
pub fn provision(
    input: &ProvisionInput,
    config: &ProvisionerConfig,
) -> Result<ProvisionReport, ProvisionFailure> {
    config.validate().map_err(|err| ProvisionFailure::new(ProvisionStage::Validated, err))?;
    provision_with(&host_context(config), input)
}

/// Provision against an arbitrary set of ports.
pub fn provision_with<S, T, G, R>(
    ctx: &ProvisionContext<S, T, G, R>,
    input: &ProvisionInput,
) -> Result<ProvisionReport, ProvisionFailure>
where
    S: SystemOps,
    T: TemplateRenderer,
    G: SecretGenerator,
    R: Reporter,
{
    provision::execute(ctx, input)
}
