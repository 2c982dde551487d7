pub mod filesystem;
pub mod secret;
pub mod system_command;
pub mod template;
pub mod tracing_reporter;

pub use secret::OsSecretGenerator;
pub use system_command::CommandSystemOps;
pub use template::{MinijinjaTemplateRenderer, TemplateSource};
pub use tracing_reporter::TracingReporter;
