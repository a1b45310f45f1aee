use chamber_core::enums::UserRole;
use chamber_core::forms::SignUpForm;
use chamber_core::validation::Validate;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::UserCommands;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::lookup::find_user;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `chamber user`.
pub async fn handle(action: &UserCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        UserCommands::Create { name, email } => {
            let form = SignUpForm {
                name: name.clone(),
                email: email.clone(),
            };
            let new = form.validate().into_result()?;
            let user = ctx.service.create_user(&new, UserRole::Member).await?;
            output(&user, flags.format)
        }
        UserCommands::List => {
            ctx.viewer.require_admin()?;
            let limit = effective_limit(None, flags.limit, ctx.config.directory.default_limit);
            let users = ctx.service.list_users(limit).await?;
            output(&users, flags.format)
        }
        UserCommands::Get { user } => {
            ctx.viewer.require_admin()?;
            let user = find_user(ctx, user).await?;
            output(&user, flags.format)
        }
        UserCommands::Role { user, role } => {
            ctx.viewer.require_admin()?;
            let role: UserRole = parse_enum(role, "role")?;
            let user = find_user(ctx, user).await?;
            let updated = ctx.service.set_user_role(&user.id, role).await?;
            tracing::info!(user = %updated.id, role = %role, "role changed");
            output(&updated, flags.format)
        }
    }
}
