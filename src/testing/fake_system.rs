use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::domain::{AccountIdentity, AppError, CommandFailure};
use crate::ports::SystemOps;

/// A recorded call against [`FakeSystemOps`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemCall {
    OpenFirewallPort(u16),
    CreateAccount { name: String, home: PathBuf, shell: String },
    LookupAccount(String),
    SetAccountHome { name: String, home: PathBuf },
    Chown { path: PathBuf, owner: String, recursive: bool },
    Chmod { path: PathBuf, mode: u32, recursive: bool },
    RunScript { script: PathBuf, working_dir: PathBuf },
    ReloadServiceIndex,
    EnableService(String),
    StartService(String),
}

impl SystemCall {
    fn op(&self) -> &'static str {
        match self {
            SystemCall::OpenFirewallPort(_) => "open_firewall_port",
            SystemCall::CreateAccount { .. } => "create_account",
            SystemCall::LookupAccount(_) => "lookup_account",
            SystemCall::SetAccountHome { .. } => "set_account_home",
            SystemCall::Chown { .. } => "chown",
            SystemCall::Chmod { .. } => "chmod",
            SystemCall::RunScript { .. } => "run_script",
            SystemCall::ReloadServiceIndex => "reload_service_index",
            SystemCall::EnableService(_) => "enable_service",
            SystemCall::StartService(_) => "start_service",
        }
    }
}

/// In-memory host: records calls, keeps an account table, and can fail any operation.
#[derive(Default)]
pub struct FakeSystemOps {
    pub calls: Mutex<Vec<SystemCall>>,
    accounts: Mutex<BTreeMap<String, AccountIdentity>>,
    failing: Mutex<BTreeSet<&'static str>>,
    lookup_misses_created: Mutex<bool>,
    script_outputs: Mutex<Vec<String>>,
}

impl FakeSystemOps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_existing_account(self, name: &str) -> Self {
        self.insert_account(name);
        self
    }

    /// An existing account with a fixed uid, e.g. `root` at 0.
    pub fn with_existing_account_uid(self, name: &str, uid: u32) -> Self {
        self.accounts
            .lock()
            .unwrap()
            .insert(name.to_string(), AccountIdentity { name: name.to_string(), uid, gid: uid });
        self
    }

    /// Make every call of `op` (a `SystemOps` method name) fail with exit status 1.
    pub fn failing_on(self, op: &'static str) -> Self {
        self.failing.lock().unwrap().insert(op);
        self
    }

    /// Accounts created through the fake never resolve afterwards.
    pub fn losing_created_accounts(self) -> Self {
        *self.lookup_misses_created.lock().unwrap() = true;
        self
    }

    /// Files `run_script` creates in its working directory, mimicking an installer.
    pub fn script_creates(self, names: &[&str]) -> Self {
        self.script_outputs.lock().unwrap().extend(names.iter().map(|name| name.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<SystemCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Names of the recorded operations, in call order.
    pub fn ops(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().iter().map(SystemCall::op).collect()
    }

    fn insert_account(&self, name: &str) {
        let mut accounts = self.accounts.lock().unwrap();
        let id = 1000 + accounts.len() as u32;
        accounts.insert(name.to_string(), AccountIdentity { name: name.to_string(), uid: id, gid: id });
    }

    fn record(&self, call: SystemCall) -> Result<(), AppError> {
        let op = call.op();
        let rendered = format!("{call:?}");
        self.calls.lock().unwrap().push(call);
        if self.failing.lock().unwrap().contains(op) {
            return Err(CommandFailure {
                command: rendered,
                exit_code: Some(1),
                stderr: format!("simulated {op} failure"),
            }
            .into());
        }
        Ok(())
    }
}

impl SystemOps for FakeSystemOps {
    fn open_firewall_port(&self, port: u16) -> Result<(), AppError> {
        self.record(SystemCall::OpenFirewallPort(port))
    }

    fn create_account(&self, name: &str, home: &Path, shell: &str) -> Result<(), AppError> {
        self.record(SystemCall::CreateAccount {
            name: name.to_string(),
            home: home.to_path_buf(),
            shell: shell.to_string(),
        })?;
        if !*self.lookup_misses_created.lock().unwrap() {
            self.insert_account(name);
        }
        Ok(())
    }

    fn lookup_account(&self, name: &str) -> Result<Option<AccountIdentity>, AppError> {
        self.record(SystemCall::LookupAccount(name.to_string())).map_err(|err| {
            AppError::AccountLookup { account: name.to_string(), details: err.to_string() }
        })?;
        Ok(self.accounts.lock().unwrap().get(name).cloned())
    }

    fn set_account_home(&self, name: &str, home: &Path) -> Result<(), AppError> {
        self.record(SystemCall::SetAccountHome { name: name.to_string(), home: home.to_path_buf() })
    }

    fn chown(&self, path: &Path, owner: &str, recursive: bool) -> Result<(), AppError> {
        self.record(SystemCall::Chown {
            path: path.to_path_buf(),
            owner: owner.to_string(),
            recursive,
        })
    }

    fn chmod(&self, path: &Path, mode: u32, recursive: bool) -> Result<(), AppError> {
        self.record(SystemCall::Chmod { path: path.to_path_buf(), mode, recursive })
    }

    fn run_script(&self, script: &Path, working_dir: &Path) -> Result<(), AppError> {
        self.record(SystemCall::RunScript {
            script: script.to_path_buf(),
            working_dir: working_dir.to_path_buf(),
        })?;
        for name in self.script_outputs.lock().unwrap().iter() {
            fs::write(working_dir.join(name), b"")?;
        }
        Ok(())
    }

    fn reload_service_index(&self) -> Result<(), AppError> {
        self.record(SystemCall::ReloadServiceIndex)
    }

    fn enable_service(&self, unit: &str) -> Result<(), AppError> {
        self.record(SystemCall::EnableService(unit.to_string()))
    }

    fn start_service(&self, unit: &str) -> Result<(), AppError> {
        self.record(SystemCall::StartService(unit.to_string()))
    }
}
