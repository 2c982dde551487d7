//! The provisioning state machine.
//!
//! Stages run strictly in order. The first failure ends the run; nothing
//! done by earlier stages is rolled back.

pub mod account;
pub mod engine;
mod policy;
pub mod server_config;
pub mod service;

use std::fs::DirBuilder;
use std::io;
use std::os::unix::fs::DirBuilderExt;

use crate::app::ProvisionContext;
use crate::domain::{
    AppError, ProvisionFailure, ProvisionInput, ProvisionReport, ProvisionRequest, ProvisionStage,
    ServerInstallation,
};
use crate::ports::{ProvisionEvent, Reporter, SecretGenerator, SystemOps, TemplateRenderer};

/// Mode of directories created for the installation root before the owner takes it over.
const ROOT_DIR_MODE: u32 = 0o755;

/// Execute a full provisioning run for `input`.
pub fn execute<S, T, G, R>(
    ctx: &ProvisionContext<S, T, G, R>,
    input: &ProvisionInput,
) -> Result<ProvisionReport, ProvisionFailure>
where
    S: SystemOps,
    T: TemplateRenderer,
    G: SecretGenerator,
    R: Reporter,
{
    let outcome = run(ctx, input);
    match &outcome {
        Ok(report) => ctx.reporter().report(ProvisionEvent::Completed(report)),
        Err(failure) => ctx.reporter().report(ProvisionEvent::Failed(failure)),
    }
    outcome
}

fn run<S, T, G, R>(
    ctx: &ProvisionContext<S, T, G, R>,
    input: &ProvisionInput,
) -> Result<ProvisionReport, ProvisionFailure>
where
    S: SystemOps,
    T: TemplateRenderer,
    G: SecretGenerator,
    R: Reporter,
{
    ctx.reporter().report(ProvisionEvent::StageStarted { stage: ProvisionStage::Validated });
    let request = ProvisionRequest::validate(input)
        .map_err(|err| ProvisionFailure::new(ProvisionStage::Validated, err))?;
    let mut installation = ServerInstallation::new(request, &ctx.config().servers_root);
    ctx.reporter().report(ProvisionEvent::StageCompleted { stage: ProvisionStage::Validated });

    run_stage(ctx, &mut installation, ProvisionStage::FirewallOpened, |ctx, installation| {
        ctx.system().open_firewall_port(installation.request().port())
    })?;

    run_stage(ctx, &mut installation, ProvisionStage::HomeCreated, |_, installation| {
        let root = installation.root();
        DirBuilder::new().recursive(true).mode(ROOT_DIR_MODE).create(root).map_err(|err| {
            AppError::Io(io::Error::new(err.kind(), format!("create {}: {err}", root.display())))
        })
    })?;

    let account = run_stage(ctx, &mut installation, ProvisionStage::AccountReady, |ctx, installation| {
        account::ensure_account(ctx, installation)
    })?;
    if let Some(account) = account {
        installation.set_account(account);
    }

    run_stage(ctx, &mut installation, ProvisionStage::EulaAccepted, |_, installation| {
        server_config::accept_eula(installation)
    })?;

    let properties = run_stage(ctx, &mut installation, ProvisionStage::ConfigWritten, |ctx, installation| {
        server_config::write_server_properties(ctx, installation)
    })?;

    let engine = run_stage(ctx, &mut installation, ProvisionStage::EngineInstalled, |ctx, installation| {
        let outcome = engine::install(ctx, installation)?;
        account::hand_back_root(ctx.system(), installation)?;
        Ok(outcome)
    })?;

    let unit = run_stage(ctx, &mut installation, ProvisionStage::ServiceRegistered, |ctx, installation| {
        service::register_service(ctx, installation)
    })?;

    installation
        .advance(ProvisionStage::Done)
        .map_err(|err| ProvisionFailure::new(ProvisionStage::Done, err))?;
    ctx.reporter().report(ProvisionEvent::StageCompleted { stage: ProvisionStage::Done });

    let request = installation.request();
    Ok(ProvisionReport {
        owner_id: request.owner_id().to_string(),
        instance_id: request.instance_id().to_string(),
        engine: request.engine(),
        root: installation.root().to_path_buf(),
        account: installation.account().cloned(),
        unit,
        server_port: properties.server_port,
        rcon_port: properties.rcon_port,
        query_port: properties.query_port,
        start_script: engine.start_script,
        engine_jar: engine.jar,
    })
}

/// Run one stage inside its tracing span and advance the installation on success.
fn run_stage<S, T, G, R, F, O>(
    ctx: &ProvisionContext<S, T, G, R>,
    installation: &mut ServerInstallation,
    stage: ProvisionStage,
    action: F,
) -> Result<O, ProvisionFailure>
where
    S: SystemOps,
    T: TemplateRenderer,
    G: SecretGenerator,
    R: Reporter,
    F: FnOnce(&ProvisionContext<S, T, G, R>, &ServerInstallation) -> Result<O, AppError>,
{
    let span = tracing::info_span!(
        "stage",
        stage = stage.label(),
        owner = installation.request().owner_id(),
        instance = installation.request().instance_id(),
    );
    let _entered = span.enter();

    ctx.reporter().report(ProvisionEvent::StageStarted { stage });
    let output = action(ctx, installation).map_err(|err| ProvisionFailure::new(stage, err))?;
    installation.advance(stage).map_err(|err| ProvisionFailure::new(stage, err))?;
    ctx.reporter().report(ProvisionEvent::StageCompleted { stage });
    Ok(output)
}
