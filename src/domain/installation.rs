//! Provisioning state machine: stages, the per-run working record, and outcomes.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::domain::{AppError, EngineVariant, ProvisionRequest};

/// Stages of a provisioning run, in the only order they may be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ProvisionStage {
    Validated,
    FirewallOpened,
    HomeCreated,
    AccountReady,
    EulaAccepted,
    ConfigWritten,
    EngineInstalled,
    ServiceRegistered,
    Done,
}

impl ProvisionStage {
    pub const ALL: [ProvisionStage; 9] = [
        ProvisionStage::Validated,
        ProvisionStage::FirewallOpened,
        ProvisionStage::HomeCreated,
        ProvisionStage::AccountReady,
        ProvisionStage::EulaAccepted,
        ProvisionStage::ConfigWritten,
        ProvisionStage::EngineInstalled,
        ProvisionStage::ServiceRegistered,
        ProvisionStage::Done,
    ];

    /// The single stage reachable from this one, `None` after `Done`.
    pub fn next(self) -> Option<ProvisionStage> {
        let index = Self::ALL.iter().position(|stage| *stage == self)?;
        Self::ALL.get(index + 1).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            ProvisionStage::Validated => "validated",
            ProvisionStage::FirewallOpened => "firewall_opened",
            ProvisionStage::HomeCreated => "home_created",
            ProvisionStage::AccountReady => "account_ready",
            ProvisionStage::EulaAccepted => "eula_accepted",
            ProvisionStage::ConfigWritten => "config_written",
            ProvisionStage::EngineInstalled => "engine_installed",
            ProvisionStage::ServiceRegistered => "service_registered",
            ProvisionStage::Done => "done",
        }
    }
}

impl fmt::Display for ProvisionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether a failing step ends the run or is reported and skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPolicy {
    Fatal,
    BestEffort,
}

/// Resolving the new account's numeric identity is fatal: every later
/// ownership change depends on it.
pub const ACCOUNT_LOOKUP_POLICY: StepPolicy = StepPolicy::Fatal;

/// Removing Forge installer leftovers never blocks a working server.
pub const FORGE_CLEANUP_POLICY: StepPolicy = StepPolicy::BestEffort;

/// Numeric identity of the OS account that owns the installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountIdentity {
    pub name: String,
    pub uid: u32,
    pub gid: u32,
}

/// Working record of one provisioning run. Never persisted.
#[derive(Debug)]
pub struct ServerInstallation {
    request: ProvisionRequest,
    root: PathBuf,
    account: Option<AccountIdentity>,
    stage: ProvisionStage,
}

impl ServerInstallation {
    /// Start a run for a validated request under `servers_root`.
    pub fn new(request: ProvisionRequest, servers_root: &Path) -> Self {
        let root = installation_root(servers_root, request.owner_id(), request.instance_id());
        Self { request, root, account: None, stage: ProvisionStage::Validated }
    }

    pub fn request(&self) -> &ProvisionRequest {
        &self.request
    }

    /// Installation root, also the account's home directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn account(&self) -> Option<&AccountIdentity> {
        self.account.as_ref()
    }

    pub fn set_account(&mut self, account: AccountIdentity) {
        self.account = Some(account);
    }

    /// Last stage completed successfully.
    pub fn stage(&self) -> ProvisionStage {
        self.stage
    }

    /// Name of the supervised unit, without the `.service` suffix.
    pub fn unit_name(&self) -> String {
        unit_name(self.request.owner_id(), self.request.instance_id())
    }

    /// Record completion of `next`. Only the immediate successor is accepted.
    pub fn advance(&mut self, next: ProvisionStage) -> Result<(), AppError> {
        if self.stage.next() != Some(next) {
            return Err(AppError::InternalError(format!(
                "illegal stage transition {} -> {}",
                self.stage, next
            )));
        }
        self.stage = next;
        Ok(())
    }
}

/// Deterministic installation root: `<servers_root>/<owner>/<instance>`.
pub fn installation_root(servers_root: &Path, owner_id: &str, instance_id: &str) -> PathBuf {
    servers_root.join(owner_id).join(instance_id)
}

/// Deterministic unit name: `<owner>_<instance>`.
pub fn unit_name(owner_id: &str, instance_id: &str) -> String {
    format!("{owner_id}_{instance_id}")
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionReport {
    pub owner_id: String,
    pub instance_id: String,
    pub engine: EngineVariant,
    pub root: PathBuf,
    /// `None` only when the identity lookup ran under a best-effort policy and failed.
    pub account: Option<AccountIdentity>,
    pub unit: String,
    pub server_port: u16,
    pub rcon_port: u16,
    pub query_port: u16,
    pub start_script: PathBuf,
    pub engine_jar: String,
}

/// The absorbing failure state: the stage being attempted and its cause.
#[derive(Debug, Error)]
#[error("provisioning failed at stage '{stage}': {error}")]
pub struct ProvisionFailure {
    pub stage: ProvisionStage,
    #[source]
    pub error: AppError,
}

impl ProvisionFailure {
    pub fn new(stage: ProvisionStage, error: AppError) -> Self {
        Self { stage, error }
    }

    pub fn exit_code(&self) -> i32 {
        self.error.class().exit_code()
    }
}
