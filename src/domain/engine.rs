//! Engine artifact names, the Forge install plan, and installed-jar discovery.

/// Jar name of the Paper server inside the installation root.
pub const PAPER_JAR: &str = "paper.jar";

/// Jar name of the Fabric server launcher inside the installation root.
pub const FABRIC_LAUNCHER_JAR: &str = "fabric-server-launch.jar";

/// Glob matched against file names to find the jar the Forge installer produced.
pub const FORGE_ARTIFACT_PATTERN: &str = "forge*.jar";

/// Files the Forge install phase uses, and the leftovers it must remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForgeInstallPlan {
    /// Name the installer jar is staged under.
    pub installer_jar: &'static str,
    /// One-shot script that runs the installer.
    pub install_script: &'static str,
    /// Installer-only artifacts removed once the server jar is resolved.
    pub cleanup: Vec<&'static str>,
}

impl Default for ForgeInstallPlan {
    fn default() -> Self {
        Self {
            installer_jar: "installer.jar",
            install_script: "install.sh",
            cleanup: vec!["installer.jar", "installer.jar.log", "run.bat", "install.sh"],
        }
    }
}

/// Phases of the two-phase Forge install, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForgePhase {
    /// Installer jar copied and install-mode script rendered.
    Staged,
    /// Installer exited with status 0.
    Installed,
    /// Server jar found.
    Resolved { jar: String },
    /// Installer leftovers removed (best effort).
    Cleaned { removed: Vec<String>, skipped: Vec<String> },
    /// Run-mode script rendered.
    Finalized { jar: String },
}

impl ForgePhase {
    pub fn label(&self) -> &'static str {
        match self {
            ForgePhase::Staged => "staged",
            ForgePhase::Installed => "installed",
            ForgePhase::Resolved { .. } => "resolved",
            ForgePhase::Cleaned { .. } => "cleaned",
            ForgePhase::Finalized { .. } => "finalized",
        }
    }
}

/// Pick the installed server jar from candidate file names already matching
/// [`FORGE_ARTIFACT_PATTERN`].
///
/// Names containing `installer` are excluded; of the rest, the
/// lexicographically smallest wins. Plain byte order would otherwise rank
/// `forge-1.20.1-installer.jar` ahead of `forge-1.20.1.jar`.
pub fn select_installed_artifact<S: AsRef<str>>(candidates: &[S]) -> Option<&str> {
    candidates
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| !name.to_ascii_lowercase().contains("installer"))
        .min()
}
