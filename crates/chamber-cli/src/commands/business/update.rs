use crate::cli::GlobalFlags;
use crate::cli::subcommands::BusinessFields;
use crate::commands::shared::lookup::find_business;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(key: &str, fields: &BusinessFields, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let business = find_business(ctx, key).await?;
    ctx.viewer.require_manager_of(&business)?;

    let profile = super::validate_profile(fields, business.logo_url.clone(), ctx).await?;
    let updated = ctx.service.update_business_profile(&business.id, &profile).await?;
    output(&updated, flags.format)
}
