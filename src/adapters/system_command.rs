use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::Command;

use nix::unistd::User;

use crate::domain::config::ToolPaths;
use crate::domain::{AccountIdentity, AppError, CommandFailure};
use crate::ports::SystemOps;

/// `SystemOps` backed by the host's command-line tools.
#[derive(Debug, Clone)]
pub struct CommandSystemOps {
    tools: ToolPaths,
}

impl CommandSystemOps {
    pub fn new(tools: ToolPaths) -> Self {
        Self { tools }
    }

    fn run<I, S>(&self, program: &str, args: I, cwd: Option<&Path>) -> Result<String, AppError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<S> = args.into_iter().collect();
        let rendered = std::iter::once(program.to_string())
            .chain(args.iter().map(|arg| arg.as_ref().to_string_lossy().into_owned()))
            .collect::<Vec<_>>()
            .join(" ");

        let mut command = Command::new(program);
        command.args(&args);
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }

        tracing::debug!(command = %rendered, "running external command");
        let output = command.output().map_err(|e| CommandFailure {
            command: rendered.clone(),
            exit_code: None,
            stderr: e.to_string(),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(CommandFailure {
                command: rendered,
                exit_code: output.status.code(),
                stderr: if stderr.is_empty() { "Unknown error".to_string() } else { stderr },
            }
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// `chown` arguments. `owner:` selects the account's login group, which
/// need not share the account's name.
fn chown_args(path: &Path, owner: &str, recursive: bool) -> Vec<OsString> {
    let mut args = Vec::new();
    if recursive {
        args.push(OsString::from("-R"));
    }
    args.push(OsString::from(format!("{owner}:")));
    args.push(path.as_os_str().to_os_string());
    args
}

impl SystemOps for CommandSystemOps {
    fn open_firewall_port(&self, port: u16) -> Result<(), AppError> {
        self.run(&self.tools.ufw, ["allow".to_string(), port.to_string()], None)?;
        Ok(())
    }

    fn create_account(&self, name: &str, home: &Path, shell: &str) -> Result<(), AppError> {
        self.run(
            &self.tools.useradd,
            [OsStr::new("-d"), home.as_os_str(), OsStr::new("-s"), OsStr::new(shell), OsStr::new(name)],
            None,
        )?;
        Ok(())
    }

    fn lookup_account(&self, name: &str) -> Result<Option<AccountIdentity>, AppError> {
        let user = User::from_name(name).map_err(|errno| AppError::AccountLookup {
            account: name.to_string(),
            details: errno.desc().to_string(),
        })?;
        Ok(user.map(|user| AccountIdentity {
            name: user.name,
            uid: user.uid.as_raw(),
            gid: user.gid.as_raw(),
        }))
    }

    fn set_account_home(&self, name: &str, home: &Path) -> Result<(), AppError> {
        self.run(
            &self.tools.usermod,
            [OsStr::new("-d"), home.as_os_str(), OsStr::new(name)],
            None,
        )?;
        Ok(())
    }

    fn chown(&self, path: &Path, owner: &str, recursive: bool) -> Result<(), AppError> {
        self.run(&self.tools.chown, chown_args(path, owner, recursive), None)?;
        Ok(())
    }

    fn chmod(&self, path: &Path, mode: u32, recursive: bool) -> Result<(), AppError> {
        let mode = format!("{mode:04o}");
        let mut args = Vec::new();
        if recursive {
            args.push(OsStr::new("-R"));
        }
        args.push(OsStr::new(&mode));
        args.push(path.as_os_str());
        self.run(&self.tools.chmod, args, None)?;
        Ok(())
    }

    fn run_script(&self, script: &Path, working_dir: &Path) -> Result<(), AppError> {
        let output = self.run(&self.tools.sh, [script.as_os_str()], Some(working_dir))?;
        if !output.is_empty() {
            tracing::debug!(script = %script.display(), output = %output, "script output");
        }
        Ok(())
    }

    fn reload_service_index(&self) -> Result<(), AppError> {
        self.run(&self.tools.systemctl, ["daemon-reload"], None)?;
        Ok(())
    }

    fn enable_service(&self, unit: &str) -> Result<(), AppError> {
        self.run(&self.tools.systemctl, ["enable", unit], None)?;
        Ok(())
    }

    fn start_service(&self, unit: &str) -> Result<(), AppError> {
        self.run(&self.tools.systemctl, ["start", unit], None)?;
        Ok(())
    }
}
