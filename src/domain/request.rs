//! Provisioning request model and its validation.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::AppError;
use crate::domain::validation::{
    validate_account_name, validate_identifier, validate_memory_size,
};

/// Highest game port that still leaves room for the RCON and query ports.
pub const MAX_GAME_PORT: u32 = 65533;

/// Upper bound on dedicated CPU threads.
pub const MAX_THREADS: u32 = 1024;

/// Server engine deployed into the installation root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineVariant {
    /// PaperMC, which also fills the vanilla slot.
    Paper,
    Forge,
    Fabric,
}

impl EngineVariant {
    /// Resolve the numeric `-userServerType` code.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(EngineVariant::Paper),
            2 => Some(EngineVariant::Forge),
            3 => Some(EngineVariant::Fabric),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            EngineVariant::Paper => 1,
            EngineVariant::Forge => 2,
            EngineVariant::Fabric => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EngineVariant::Paper => "paper",
            EngineVariant::Forge => "forge",
            EngineVariant::Fabric => "fabric",
        }
    }
}

impl fmt::Display for EngineVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EngineVariant {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vanilla" | "paper" | "1" => Ok(EngineVariant::Paper),
            "forge" | "2" => Ok(EngineVariant::Forge),
            "fabric" | "3" => Ok(EngineVariant::Fabric),
            other => Err(AppError::validation(
                "userServerType",
                format!("unknown engine '{other}' (expected 1=vanilla/paper, 2=forge, 3=fabric)"),
            )),
        }
    }
}

/// Raw, unvalidated provisioning input as received from the command line.
#[derive(Debug, Clone, Default)]
pub struct ProvisionInput {
    pub user_id: String,
    pub server_id: String,
    pub server_type: u8,
    pub port: u32,
    pub xms: String,
    pub xmx: String,
    pub threads: u32,
}

/// Validated, immutable provisioning request.
///
/// Only constructible through [`ProvisionRequest::validate`], so holding one
/// proves every field is present and structurally valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionRequest {
    owner_id: String,
    instance_id: String,
    engine: EngineVariant,
    port: u16,
    xms: String,
    xmx: String,
    threads: u32,
}

impl ProvisionRequest {
    /// Validate raw input. The first invalid field is reported.
    pub fn validate(input: &ProvisionInput) -> Result<Self, AppError> {
        let owner_id = input.user_id.trim();
        if owner_id.is_empty() {
            return Err(AppError::validation("userID", "is required"));
        }
        if !validate_account_name(owner_id) {
            return Err(AppError::validation(
                "userID",
                format!(
                    "'{owner_id}' is not a valid account name (letter or '_' first, then alphanumerics, '-' or '_', at most 32 characters)"
                ),
            ));
        }

        let instance_id = input.server_id.trim();
        if instance_id.is_empty() {
            return Err(AppError::validation("userServerID", "is required"));
        }
        if !validate_identifier(instance_id) {
            return Err(AppError::validation(
                "userServerID",
                format!("'{instance_id}' must be alphanumeric with hyphens or underscores"),
            ));
        }

        let engine = EngineVariant::from_code(input.server_type).ok_or_else(|| {
            AppError::validation(
                "userServerType",
                format!("{} is not one of 1 (vanilla/paper), 2 (forge), 3 (fabric)", input.server_type),
            )
        })?;

        if input.port == 0 || input.port > MAX_GAME_PORT {
            return Err(AppError::validation(
                "userServerPort",
                format!(
                    "{} is out of range; the game, RCON and query ports must all fit in 1..=65535, so the game port must be within 1..={MAX_GAME_PORT}",
                    input.port
                ),
            ));
        }
        let port = u16::try_from(input.port).map_err(|_| {
            AppError::validation("userServerPort", format!("{} is not a valid port", input.port))
        })?;

        let xms = input.xms.trim();
        if !validate_memory_size(xms) {
            return Err(AppError::validation(
                "userServerXMS",
                format!("'{xms}' must be a positive size such as 512M or 2G"),
            ));
        }
        let xmx = input.xmx.trim();
        if !validate_memory_size(xmx) {
            return Err(AppError::validation(
                "userServerXMX",
                format!("'{xmx}' must be a positive size such as 512M or 2G"),
            ));
        }

        if input.threads == 0 || input.threads > MAX_THREADS {
            return Err(AppError::validation(
                "userServerThreads",
                format!("{} must be within 1..={MAX_THREADS}", input.threads),
            ));
        }

        Ok(Self {
            owner_id: owner_id.to_string(),
            instance_id: instance_id.to_string(),
            engine,
            port,
            xms: xms.to_string(),
            xmx: xmx.to_string(),
            threads: input.threads,
        })
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    pub fn engine(&self) -> EngineVariant {
        self.engine
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn xms(&self) -> &str {
        &self.xms
    }

    pub fn xmx(&self) -> &str {
        &self.xmx
    }

    pub fn threads(&self) -> u32 {
        self.threads
    }
}
