use chamber_core::directory::item::business_href;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::BusinessFields;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(fields: &BusinessFields, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let identity = ctx.viewer.require_signed_in()?;
    let profile = super::validate_profile(fields, None, ctx).await?;
    let business = ctx.service.create_business(&identity.user_id, &profile).await?;
    let href = business_href(&business.id);

    output(
        &json!({
            "business": business,
            "href": href,
            "verified": false,
        }),
        flags.format,
    )
}
