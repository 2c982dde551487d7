mod reporter;
mod secret_generator;
mod system_ops;
mod template_renderer;

pub use reporter::{ProvisionEvent, Reporter};
pub use secret_generator::SecretGenerator;
pub use system_ops::SystemOps;
pub use template_renderer::{TemplateName, TemplateParams, TemplateRenderer};
