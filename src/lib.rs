//! mcdeploy: provision a single Minecraft server instance as a supervised
//! service on a Linux host.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::ProvisionContext;
pub use app::api::{HostContext, host_context, provision, provision_with};
pub use domain::{
    AppError, EngineVariant, ErrorClass, ProvisionFailure, ProvisionInput, ProvisionReport,
    ProvisionStage, ProvisionerConfig,
};
