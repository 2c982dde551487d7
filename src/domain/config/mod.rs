pub mod parse;
pub mod paths;
pub mod provisioner;

pub use parse::parse_config_content;
pub use provisioner::{
    AccountConfig, ArtifactSource, EngineArtifacts, ExistingAccountPolicy, LogFormat,
    LoggingConfig, ProvisionerConfig, SecretsConfig, ToolPaths,
};
