//! Two-phase Forge install: run the installer, find the jar it produced,
//! clean up, then render the run-mode script.

use std::path::Path;

use super::{EngineOutcome, render_script, stage_artifact};
use crate::adapters::filesystem::{find_matching, remove_if_present};
use crate::app::ProvisionContext;
use crate::app::commands::provision::policy::apply_policy;
use crate::domain::engine::{FORGE_ARTIFACT_PATTERN, select_installed_artifact};
use crate::domain::installation::FORGE_CLEANUP_POLICY;
use crate::domain::launch::START_SCRIPT;
use crate::domain::{
    AppError, ForgeInstallPlan, ForgePhase, LaunchMode, ProvisionStage, ServerInstallation,
};
use crate::ports::{Reporter, SecretGenerator, SystemOps, TemplateRenderer};

pub fn install<S, T, G, R>(
    ctx: &ProvisionContext<S, T, G, R>,
    installation: &ServerInstallation,
) -> Result<EngineOutcome, AppError>
where
    S: SystemOps,
    T: TemplateRenderer,
    G: SecretGenerator,
    R: Reporter,
{
    let plan = ForgeInstallPlan::default();
    let root = installation.root();
    let mut phases = Vec::new();

    stage_artifact(ctx, installation, &ctx.config().engines.forge_installer, plan.installer_jar)?;
    let install_script = render_script(
        ctx,
        installation,
        plan.installer_jar,
        LaunchMode::Install,
        plan.install_script,
    )?;
    enter(&mut phases, ForgePhase::Staged);

    ctx.system().run_script(&install_script, root)?;
    enter(&mut phases, ForgePhase::Installed);

    let jar = resolve_installed_jar(root)?;
    enter(&mut phases, ForgePhase::Resolved { jar: jar.clone() });

    let (removed, skipped) = clean_up(ctx.reporter(), &plan, root)?;
    enter(&mut phases, ForgePhase::Cleaned { removed, skipped });

    let start_script = render_script(ctx, installation, &jar, LaunchMode::Run, START_SCRIPT)?;
    enter(&mut phases, ForgePhase::Finalized { jar: jar.clone() });

    Ok(EngineOutcome { jar, start_script, phases })
}

fn enter(phases: &mut Vec<ForgePhase>, phase: ForgePhase) {
    tracing::debug!(phase = phase.label(), "forge install phase");
    phases.push(phase);
}

fn resolve_installed_jar(root: &Path) -> Result<String, AppError> {
    let candidates = find_matching(root, FORGE_ARTIFACT_PATTERN)?;
    let jar = select_installed_artifact(&candidates).ok_or_else(|| {
        AppError::InstalledArtifactNotFound {
            dir: root.to_path_buf(),
            pattern: FORGE_ARTIFACT_PATTERN.to_string(),
        }
    })?;
    if candidates.len() > 1 {
        tracing::debug!(?candidates, selected = jar, "several forge jars present");
    }
    Ok(jar.to_string())
}

/// Remove installer leftovers. Returns the removed names and the names whose
/// removal failed and was skipped.
fn clean_up<R: Reporter>(
    reporter: &R,
    plan: &ForgeInstallPlan,
    root: &Path,
) -> Result<(Vec<String>, Vec<String>), AppError> {
    let mut removed = Vec::new();
    let mut skipped = Vec::new();
    for name in &plan.cleanup {
        let step = format!("remove {name}");
        let outcome = apply_policy(
            reporter,
            ProvisionStage::EngineInstalled,
            &step,
            FORGE_CLEANUP_POLICY,
            remove_if_present(&root.join(name)).map_err(AppError::from),
        )?;
        match outcome {
            Some(true) => removed.push(name.to_string()),
            Some(false) => {}
            None => skipped.push(name.to_string()),
        }
    }
    Ok((removed, skipped))
}
