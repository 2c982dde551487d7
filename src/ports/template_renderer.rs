use std::path::Path;

use serde::Serialize;

use crate::domain::{AppError, ServerProperties, ServiceUnitParams, StartupScriptParams};

/// Templates the provisioner renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateName {
    StartupScript,
    ServiceUnit,
    ServerProperties,
}

impl TemplateName {
    /// File name of the template inside the template source.
    pub fn file_name(self) -> &'static str {
        match self {
            TemplateName::StartupScript => "start.sh.j2",
            TemplateName::ServiceUnit => "minecraft.service.j2",
            TemplateName::ServerProperties => "server.properties.j2",
        }
    }
}

/// A typed parameter record bound to the one template it fills.
pub trait TemplateParams: Serialize {
    const TEMPLATE: TemplateName;
}

impl TemplateParams for StartupScriptParams {
    const TEMPLATE: TemplateName = TemplateName::StartupScript;
}

impl TemplateParams for ServiceUnitParams {
    const TEMPLATE: TemplateName = TemplateName::ServiceUnit;
}

impl TemplateParams for ServerProperties {
    const TEMPLATE: TemplateName = TemplateName::ServerProperties;
}

/// Port for rendering templates to files.
pub trait TemplateRenderer {
    /// Render `P::TEMPLATE` with `params` into a string.
    fn render_to_string<P: TemplateParams>(&self, params: &P) -> Result<String, AppError>;

    /// Render into `destination` with permission bits `mode`.
    ///
    /// Readers of `destination` never observe a partially written file.
    fn render<P: TemplateParams>(
        &self,
        params: &P,
        destination: &Path,
        mode: u32,
    ) -> Result<(), AppError>;
}
