use chamber_core::errors::CoreError;
use chamber_core::responses::BusinessProfileResponse;

use crate::cli::GlobalFlags;
use crate::commands::shared::lookup::find_business;
use crate::context::AppContext;
use crate::output::output;

/// Public profile. Unverified businesses are only visible to their owner
/// and to admins.
pub async fn run(key: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let business = find_business(ctx, key).await?;
    if !business.verified && ctx.viewer.require_manager_of(&business).is_err() {
        return Err(CoreError::not_found("business", key).into());
    }

    let owner = ctx.service.get_user(&business.owner_id).await.ok();
    let business_type = ctx.service.get_business_type_by_id(&business.type_id).await.ok();
    let services = ctx.service.list_services(&business.id).await?;
    let gallery = ctx.service.list_gallery(&business.id).await?;

    output(
        &BusinessProfileResponse {
            business,
            owner,
            business_type,
            services,
            gallery,
            enquire_action: ctx.viewer.enquire_action().to_string(),
        },
        flags.format,
    )
}
