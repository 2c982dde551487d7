//! Account preparation: create (or adopt) the owner's account and hand it the installation root.

use crate::app::ProvisionContext;
use crate::app::commands::provision::policy::apply_policy;
use crate::domain::installation::ACCOUNT_LOOKUP_POLICY;
use crate::domain::{
    AccountIdentity, AppError, ExistingAccountPolicy, ProvisionStage, ServerInstallation,
};
use crate::ports::{Reporter, SecretGenerator, SystemOps, TemplateRenderer};

/// Permission bits applied recursively to the installation root. No sticky bit.
pub const HOME_MODE: u32 = 0o750;

/// Ensure the owner's account exists, is homed at the installation root, and
/// owns it.
///
/// Returns `None` only when identity resolution is best-effort and failed.
pub fn ensure_account<S, T, G, R>(
    ctx: &ProvisionContext<S, T, G, R>,
    installation: &ServerInstallation,
) -> Result<Option<AccountIdentity>, AppError>
where
    S: SystemOps,
    T: TemplateRenderer,
    G: SecretGenerator,
    R: Reporter,
{
    let system = ctx.system();
    let owner = installation.request().owner_id();
    let home = installation.root();
    let settings = &ctx.config().account;

    let existing =
        system.lookup_account(owner).map_err(|err| AppError::account_step(owner, "lookup", err))?;
    match (existing, settings.existing) {
        (Some(_), ExistingAccountPolicy::Reject) => {
            return Err(AppError::AccountExists(owner.to_string()));
        }
        (Some(identity), ExistingAccountPolicy::Adopt) => {
            if identity.uid == 0 || identity.uid < settings.min_uid {
                return Err(AppError::AccountProtected {
                    account: owner.to_string(),
                    uid: identity.uid,
                    min_uid: settings.min_uid,
                });
            }
            tracing::info!(account = owner, uid = identity.uid, "adopting existing account");
        }
        (None, _) => {
            system
                .create_account(owner, home, &settings.shell)
                .map_err(|err| AppError::account_step(owner, "create", err))?;
            tracing::info!(account = owner, home = %home.display(), "account created");
        }
    }

    let identity = apply_policy(
        ctx.reporter(),
        ProvisionStage::AccountReady,
        "resolve account identity",
        ACCOUNT_LOOKUP_POLICY,
        resolve_identity(system, owner),
    )?;

    system
        .set_account_home(owner, home)
        .map_err(|err| AppError::account_step(owner, "set home", err))?;
    system.chown(home, owner, true).map_err(|err| AppError::account_step(owner, "chown", err))?;
    system
        .chmod(home, HOME_MODE, true)
        .map_err(|err| AppError::account_step(owner, "chmod", err))?;

    Ok(identity)
}

/// Give everything under the installation root back to the owner.
///
/// Files written after account preparation are created by the provisioner's
/// own user.
pub fn hand_back_root<S: SystemOps>(
    system: &S,
    installation: &ServerInstallation,
) -> Result<(), AppError> {
    let owner = installation.request().owner_id();
    system
        .chown(installation.root(), owner, true)
        .map_err(|err| AppError::account_step(owner, "chown", err))
}

fn resolve_identity<S: SystemOps>(system: &S, owner: &str) -> Result<AccountIdentity, AppError> {
    match system.lookup_account(owner) {
        Ok(Some(identity)) => Ok(identity),
        Ok(None) => Err(AppError::AccountLookup {
            account: owner.to_string(),
            details: "account not found after creation".to_string(),
        }),
        Err(err) => Err(err),
    }
}
