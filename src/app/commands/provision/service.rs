//! Service registration: write the unit file, then reload, enable, and start it.

use crate::app::ProvisionContext;
use crate::domain::{AppError, ServerInstallation, ServiceUnitParams};
use crate::ports::{Reporter, SecretGenerator, SystemOps, TemplateRenderer};

pub const UNIT_MODE: u32 = 0o700;

/// Register and start `<owner>_<instance>.service`. Returns the unit file name.
pub fn register_service<S, T, G, R>(
    ctx: &ProvisionContext<S, T, G, R>,
    installation: &ServerInstallation,
) -> Result<String, AppError>
where
    S: SystemOps,
    T: TemplateRenderer,
    G: SecretGenerator,
    R: Reporter,
{
    let system = ctx.system();
    let owner = installation.request().owner_id();
    let unit = format!("{}.service", installation.unit_name());
    let path = ctx.config().unit_dir.join(&unit);
    let unit_name = unit.as_str();
    let step = |name: &'static str| move |err: AppError| AppError::service_step(unit_name, name, err);

    let params = ServiceUnitParams::new(installation.request(), installation.root());
    ctx.templates().render(&params, &path, UNIT_MODE).map_err(step("render"))?;
    system.chown(&path, owner, false).map_err(step("chown"))?;
    system.chmod(&path, UNIT_MODE, false).map_err(step("chmod"))?;
    system.reload_service_index().map_err(step("daemon-reload"))?;
    system.enable_service(&unit).map_err(step("enable"))?;
    system.start_service(&unit).map_err(step("start"))?;

    tracing::info!(unit = %unit, path = %path.display(), "service registered");
    Ok(unit)
}
