pub mod config;
pub mod engine;
pub mod error;
pub mod installation;
pub mod launch;
pub mod request;
pub mod server_properties;
pub mod validation;

pub use config::{ExistingAccountPolicy, ProvisionerConfig};
pub use engine::{ForgeInstallPlan, ForgePhase};
pub use error::{AppError, CommandFailure, ErrorClass, TemplateError};
pub use installation::{
    AccountIdentity, ProvisionFailure, ProvisionReport, ProvisionStage, ServerInstallation,
    StepPolicy,
};
pub use launch::{LaunchMode, ServiceUnitParams, StartupScriptParams};
pub use request::{EngineVariant, ProvisionInput, ProvisionRequest};
pub use server_properties::ServerProperties;
