use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::EngineVariant;

/// Library-wide error type for mcdeploy operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration file or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// A request field is missing or structurally invalid.
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// The randomness source could not produce a value.
    #[error("Entropy source failure: {0}")]
    Entropy(String),

    /// Template lookup, rendering, or output failure.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// An external program exited unsuccessfully or could not be spawned.
    #[error(transparent)]
    ExternalCommand(#[from] CommandFailure),

    /// The engine installer produced no jar matching the expected pattern.
    #[error("No installed artifact matching '{pattern}' in {}", dir.display())]
    InstalledArtifactNotFound { dir: PathBuf, pattern: String },

    /// A copied engine artifact does not match its configured digest.
    #[error("Checksum mismatch for {}: expected {expected}, found {actual}", path.display())]
    ChecksumMismatch { path: PathBuf, expected: String, actual: String },

    /// Engine-specific installation failed.
    #[error("{variant} engine installation failed: {cause}")]
    EngineInstall {
        variant: EngineVariant,
        #[source]
        cause: Box<AppError>,
    },

    /// The OS account already exists and the policy rejects reuse.
    #[error("Account '{0}' already exists")]
    AccountExists(String),

    /// An existing account below the adoptable uid range cannot be taken over.
    #[error("Account '{account}' has uid {uid}, below the adoptable minimum {min_uid}")]
    AccountProtected { account: String, uid: u32, min_uid: u32 },

    /// The OS account could not be resolved to a numeric identity.
    #[error("Account '{account}' lookup failed: {details}")]
    AccountLookup { account: String, details: String },

    /// A step of account preparation failed.
    #[error("Account '{account}' {step} failed: {cause}")]
    Account {
        account: String,
        step: &'static str,
        #[source]
        cause: Box<AppError>,
    },

    /// Internal invariant violation.
    #[error("Internal error: {0}")]
    InternalError(String),

    /// A step of service unit registration failed.
    #[error("Service '{unit}' {step} failed: {cause}")]
    ServiceRegistration {
        unit: String,
        step: &'static str,
        #[source]
        cause: Box<AppError>,
    },
}

/// Failures raised by the template renderer.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{name}' not found")]
    NotFound { name: String },

    #[error("Template '{name}' is malformed: {reason}")]
    Syntax { name: String, reason: String },

    #[error("Template '{name}' references an undefined placeholder: {reason}")]
    UndefinedPlaceholder { name: String, reason: String },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Captured outcome of an external program that did not succeed.
#[derive(Debug, Clone, Error)]
pub struct CommandFailure {
    pub command: String,
    /// `None` when the process could not be spawned or was killed by a signal.
    pub exit_code: Option<i32>,
    pub stderr: String,
}

impl fmt::Display for CommandFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.exit_code {
            Some(code) => write!(f, "'{}' exited with status {}", self.command, code)?,
            None => write!(f, "'{}' did not run to completion", self.command)?,
        }
        if !self.stderr.is_empty() {
            write!(f, ": {}", self.stderr)?;
        }
        Ok(())
    }
}

/// Failure classes, each with its own process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Validation,
    Entropy,
    Template,
    ExternalCommand,
    EngineInstall,
    Account,
    ServiceRegistration,
    Configuration,
    Io,
    Internal,
}

impl ErrorClass {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorClass::Validation => 2,
            ErrorClass::Entropy => 3,
            ErrorClass::Template => 4,
            ErrorClass::ExternalCommand => 5,
            ErrorClass::EngineInstall => 6,
            ErrorClass::Account => 7,
            ErrorClass::ServiceRegistration => 8,
            ErrorClass::Configuration => 9,
            ErrorClass::Io => 10,
            ErrorClass::Internal => 70,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ErrorClass::Validation => "validation",
            ErrorClass::Entropy => "entropy",
            ErrorClass::Template => "template",
            ErrorClass::ExternalCommand => "external_command",
            ErrorClass::EngineInstall => "engine_install",
            ErrorClass::Account => "account",
            ErrorClass::ServiceRegistration => "service_registration",
            ErrorClass::Configuration => "configuration",
            ErrorClass::Io => "io",
            ErrorClass::Internal => "internal",
        }
    }
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn validation<S: Into<String>>(field: &'static str, reason: S) -> Self {
        AppError::Validation { field, reason: reason.into() }
    }

    /// Wrap a failure as a named step of account preparation.
    pub fn account_step(account: &str, step: &'static str, cause: AppError) -> Self {
        AppError::Account { account: account.to_string(), step, cause: Box::new(cause) }
    }

    /// Wrap a failure as a named step of service registration.
    pub fn service_step(unit: &str, step: &'static str, cause: AppError) -> Self {
        AppError::ServiceRegistration { unit: unit.to_string(), step, cause: Box::new(cause) }
    }

    pub fn engine(variant: EngineVariant, cause: AppError) -> Self {
        AppError::EngineInstall { variant, cause: Box::new(cause) }
    }

    /// The class is decided by the outermost wrapper, so a failed `chown`
    /// inside account preparation is an account failure.
    pub fn class(&self) -> ErrorClass {
        match self {
            AppError::Io(_) => ErrorClass::Io,
            AppError::Configuration(_) => ErrorClass::Configuration,
            AppError::Validation { .. } => ErrorClass::Validation,
            AppError::Entropy(_) => ErrorClass::Entropy,
            AppError::Template(_) => ErrorClass::Template,
            AppError::ExternalCommand(_) => ErrorClass::ExternalCommand,
            AppError::InstalledArtifactNotFound { .. }
            | AppError::ChecksumMismatch { .. }
            | AppError::EngineInstall { .. } => ErrorClass::EngineInstall,
            AppError::AccountExists(_)
            | AppError::AccountProtected { .. }
            | AppError::AccountLookup { .. }
            | AppError::Account { .. } => ErrorClass::Account,
            AppError::ServiceRegistration { .. } => ErrorClass::ServiceRegistration,
            AppError::InternalError(_) => ErrorClass::Internal,
        }
    }

    /// Captured output of the external command at the root of this failure, if any.
    pub fn command_failure(&self) -> Option<&CommandFailure> {
        match self {
            AppError::ExternalCommand(failure) => Some(failure),
            AppError::EngineInstall { cause, .. }
            | AppError::Account { cause, .. }
            | AppError::ServiceRegistration { cause, .. } => cause.command_failure(),
            _ => None,
        }
    }
}
