use crate::domain::ProvisionerConfig;
use crate::ports::{Reporter, SecretGenerator, SystemOps, TemplateRenderer};

/// Application context holding dependencies for a provisioning run.
pub struct ProvisionContext<S, T, G, R>
where
    S: SystemOps,
    T: TemplateRenderer,
    G: SecretGenerator,
    R: Reporter,
{
    config: ProvisionerConfig,
    system: S,
    templates: T,
    secrets: G,
    reporter: R,
}

impl<S, T, G, R> ProvisionContext<S, T, G, R>
where
    S: SystemOps,
    T: TemplateRenderer,
    G: SecretGenerator,
    R: Reporter,
{
    /// Create a new provisioning context.
    pub fn new(config: ProvisionerConfig, system: S, templates: T, secrets: G, reporter: R) -> Self {
        Self { config, system, templates, secrets, reporter }
    }

    pub fn config(&self) -> &ProvisionerConfig {
        &self.config
    }

    /// Get a reference to the privileged host operations.
    pub fn system(&self) -> &S {
        &self.system
    }

    /// Get a reference to the template renderer.
    pub fn templates(&self) -> &T {
        &self.templates
    }

    pub fn secrets(&self) -> &G {
        &self.secrets
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }
}
