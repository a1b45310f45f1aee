use chamber_core::forms::ServiceForm;
use chamber_core::validation::Validate;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ServiceCommands;
use crate::commands::shared::files::upload_file;
use crate::commands::shared::lookup::find_business;
use crate::context::AppContext;
use crate::output::output;

/// Handle `chamber service`.
pub async fn handle(action: &ServiceCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        ServiceCommands::Add {
            business,
            title,
            description,
            image,
        } => {
            let business = find_business(ctx, business).await?;
            ctx.viewer.require_manager_of(&business)?;

            let mut form = ServiceForm {
                title: title.clone(),
                description: description.clone(),
                image_url: None,
            };
            // Reject a bad title before anything is uploaded.
            form.validate().into_result()?;
            if let Some(path) = image {
                let folder = format!("services/{}", business.id);
                form.image_url = Some(upload_file(ctx, path, &folder).await?);
            }
            let new = form.validate().into_result()?;
            let service = ctx.service.add_service(&business.id, &new).await?;
            output(&service, flags.format)
        }
        ServiceCommands::List { business } => {
            let business = find_business(ctx, business).await?;
            let services = ctx.service.list_services(&business.id).await?;
            output(&services, flags.format)
        }
        ServiceCommands::Remove { business, service } => {
            let business = find_business(ctx, business).await?;
            ctx.viewer.require_manager_of(&business)?;
            ctx.service.remove_service(&business.id, service).await?;
            output(&json!({ "removed": service }), flags.format)
        }
    }
}
