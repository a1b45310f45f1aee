use chamber_core::directory::item::business_href;
use chamber_mail::EmailData;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::commands::shared::lookup::{contact_address, find_business};
use crate::commands::shared::notify::notify;
use crate::context::AppContext;
use crate::output::output;

/// Verify (or un-verify) a business. The owner is emailed the first time a
/// business becomes verified.
pub async fn run(key: &str, revoke: bool, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.viewer.require_admin()?;
    let business = find_business(ctx, key).await?;
    let updated = ctx.service.set_business_verified(&business.id, !revoke).await?;

    let notification_status = if !revoke && !business.verified {
        let to = contact_address(ctx, &updated).await?;
        let data = EmailData::BusinessVerified {
            business_name: updated.name.clone(),
            profile_url: ctx.config.site.absolute_url(&business_href(&updated.id)),
        };
        notify(ctx, &data, &to).await
    } else {
        None
    };

    output(
        &json!({
            "business": updated,
            "notification_status": notification_status,
        }),
        flags.format,
    )
}
