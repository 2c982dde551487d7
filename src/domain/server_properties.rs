//! Port layout and credentials rendered into `server.properties`.

use serde::Serialize;

use crate::domain::AppError;

/// Values substituted into the `server.properties` template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerProperties {
    pub server_port: u16,
    pub rcon_port: u16,
    pub query_port: u16,
    pub rcon_password: String,
}

impl ServerProperties {
    /// Derive RCON (`port + 1`) and query (`port + 2`) ports from the game port.
    ///
    /// Fails instead of wrapping when a derived port would exceed 65535.
    pub fn derive(game_port: u16, rcon_password: String) -> Result<Self, AppError> {
        if game_port == 0 {
            return Err(AppError::validation("userServerPort", "port 0 is not a valid game port"));
        }
        let overflow = || {
            AppError::validation(
                "userServerPort",
                format!("{game_port} leaves no room for the RCON and query ports below 65536"),
            )
        };
        let rcon_port = game_port.checked_add(1).ok_or_else(overflow)?;
        let query_port = game_port.checked_add(2).ok_or_else(overflow)?;

        Ok(Self { server_port: game_port, rcon_port, query_port, rcon_password })
    }
}
