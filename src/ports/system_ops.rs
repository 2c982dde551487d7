use std::path::Path;

use crate::domain::{AccountIdentity, AppError};

/// Privileged host operations the provisioner needs.
///
/// Every call blocks until the underlying program exits. No timeout is
/// imposed: a hung installer stalls the run until the caller kills it.
pub trait SystemOps {
    /// Add a firewall allow rule for the game port.
    fn open_firewall_port(&self, port: u16) -> Result<(), AppError>;

    /// Create a login-disabled account whose home is `home`.
    fn create_account(&self, name: &str, home: &Path, shell: &str) -> Result<(), AppError>;

    /// Resolve an account to its numeric identity. `Ok(None)` when it does not exist.
    fn lookup_account(&self, name: &str) -> Result<Option<AccountIdentity>, AppError>;

    /// Point an existing account's home directory at `home`.
    fn set_account_home(&self, name: &str, home: &Path) -> Result<(), AppError>;

    /// Give `path` (recursively when asked) to `owner:owner`.
    fn chown(&self, path: &Path, owner: &str, recursive: bool) -> Result<(), AppError>;

    /// Set permission bits on `path` (recursively when asked).
    fn chmod(&self, path: &Path, mode: u32, recursive: bool) -> Result<(), AppError>;

    /// Run a shell script with `working_dir` as its current directory.
    fn run_script(&self, script: &Path, working_dir: &Path) -> Result<(), AppError>;

    /// Make the service supervisor re-read its unit files.
    fn reload_service_index(&self) -> Result<(), AppError>;

    /// Enable a unit for start on boot.
    fn enable_service(&self, unit: &str) -> Result<(), AppError>;

    /// Start a unit now.
    fn start_service(&self, unit: &str) -> Result<(), AppError>;
}
