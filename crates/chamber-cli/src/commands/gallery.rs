use chamber_core::errors::CoreError;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::GalleryCommands;
use crate::commands::shared::files::{discard_upload, upload_file};
use crate::commands::shared::lookup::find_business;
use crate::context::AppContext;
use crate::output::output;

/// Handle `chamber gallery`.
pub async fn handle(action: &GalleryCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        GalleryCommands::Add {
            business,
            file,
            caption,
        } => {
            let business = find_business(ctx, business).await?;
            ctx.viewer.require_manager_of(&business)?;

            let folder = format!("gallery/{}", business.id);
            let url = upload_file(ctx, file, &folder).await?;
            let caption = chamber_core::validation::optional(caption.as_deref());
            let image = ctx
                .service
                .add_gallery_image(&business.id, &url, caption.as_deref())
                .await?;
            output(&image, flags.format)
        }
        GalleryCommands::List { business } => {
            let business = find_business(ctx, business).await?;
            let images = ctx.service.list_gallery(&business.id).await?;
            output(&images, flags.format)
        }
        GalleryCommands::Remove { business, image } => {
            let business = find_business(ctx, business).await?;
            ctx.viewer.require_manager_of(&business)?;

            let url = ctx
                .service
                .list_gallery(&business.id)
                .await?
                .into_iter()
                .find(|img| img.id == *image)
                .map(|img| img.url)
                .ok_or_else(|| CoreError::not_found("gallery image", image))?;
            ctx.service.remove_gallery_image(&business.id, image).await?;
            discard_upload(ctx, &url).await;
            output(&json!({ "removed": image }), flags.format)
        }
    }
}
