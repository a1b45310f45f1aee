use chamber_auth::AuthError;
use chamber_core::enums::UserRole;
use chamber_core::forms::SignUpForm;
use chamber_core::validation::Validate;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InitArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `chamber init`. Opening the context already ran migrations;
/// this reports where things live and optionally bootstraps an admin.
pub async fn handle(args: &InitArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let admin = match (&args.admin_name, &args.admin_email) {
        (Some(name), Some(email)) => Some(bootstrap_admin(name, email, ctx).await?),
        _ => None,
    };

    output(
        &json!({
            "database": ctx.config.database.path,
            "remote": ctx.config.database.is_remote(),
            "storage_configured": ctx.config.storage.is_configured(),
            "mail_configured": ctx.config.mail.is_configured(),
            "admin": admin,
        }),
        flags.format,
    )
}

/// The first admin can be created by anyone. After that only admins may
/// run this again.
async fn bootstrap_admin(name: &str, email: &str, ctx: &AppContext) -> anyhow::Result<chamber_core::entities::User> {
    let users = ctx.service.list_users(u32::MAX).await?;
    let has_admin = users.iter().any(|u| u.role.is_admin());
    if has_admin && ctx.viewer.require_admin().is_err() {
        return Err(AuthError::Forbidden("an administrator already exists".into()).into());
    }

    let form = SignUpForm {
        name: name.to_string(),
        email: email.to_string(),
    };
    let new = form.validate().into_result()?;

    let user = match users.into_iter().find(|u| u.email == new.email) {
        Some(existing) => ctx.service.set_user_role(&existing.id, UserRole::Admin).await?,
        None => ctx.service.create_user(&new, UserRole::Admin).await?,
    };
    tracing::info!(user = %user.id, "administrator ready");
    Ok(user)
}
