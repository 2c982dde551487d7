//! EULA acceptance and `server.properties` generation.

use crate::adapters::filesystem::write_atomic;
use crate::app::ProvisionContext;
use crate::domain::launch::{EULA_FILE, SERVER_PROPERTIES};
use crate::domain::{AppError, ServerInstallation, ServerProperties};
use crate::ports::{Reporter, SecretGenerator, SystemOps, TemplateRenderer};

/// `server.properties` holds the RCON password.
pub const PROPERTIES_MODE: u32 = 0o640;
pub const EULA_MODE: u32 = 0o644;

pub fn accept_eula(installation: &ServerInstallation) -> Result<(), AppError> {
    write_atomic(&installation.root().join(EULA_FILE), b"eula=true\n", EULA_MODE)?;
    Ok(())
}

/// Generate RCON credentials and render `server.properties` with the derived ports.
pub fn write_server_properties<S, T, G, R>(
    ctx: &ProvisionContext<S, T, G, R>,
    installation: &ServerInstallation,
) -> Result<ServerProperties, AppError>
where
    S: SystemOps,
    T: TemplateRenderer,
    G: SecretGenerator,
    R: Reporter,
{
    let password = ctx.secrets().generate(ctx.config().secrets.rcon_password_length)?;
    let properties = ServerProperties::derive(installation.request().port(), password)?;
    ctx.templates().render(
        &properties,
        &installation.root().join(SERVER_PROPERTIES),
        PROPERTIES_MODE,
    )?;
    Ok(properties)
}
