use serde_json::json;

use crate::cli::GlobalFlags;
use crate::commands::shared::files::{discard_upload, upload_file};
use crate::commands::shared::lookup::find_business;
use crate::context::AppContext;
use crate::output::output;

/// Upload a new logo and replace the old one.
pub async fn run(key: &str, file: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let business = find_business(ctx, key).await?;
    ctx.viewer.require_manager_of(&business)?;

    let url = upload_file(ctx, file, "logos").await?;
    ctx.service.set_business_logo(&business.id, Some(&url)).await?;
    if let Some(previous) = business.logo_url.as_deref() {
        discard_upload(ctx, previous).await;
    }

    output(&json!({ "business_id": business.id, "logo_url": url }), flags.format)
}
