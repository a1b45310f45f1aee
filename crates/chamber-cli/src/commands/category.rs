use chamber_core::directory::item::category_href;
use chamber_core::entities::CategoryWithTypes;
use chamber_core::forms::CategoryForm;
use chamber_core::responses::CategoryCreateResponse;
use chamber_core::validation::Validate;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CategoryCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `chamber category`.
pub async fn handle(action: &CategoryCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        CategoryCommands::Create { name } => {
            ctx.viewer.require_admin()?;
            let new = CategoryForm { name: name.clone() }.validate().into_result()?;
            let category = ctx.service.create_category(&new).await?;
            let href = category_href(&category.slug);
            output(
                &CategoryCreateResponse {
                    category: CategoryWithTypes {
                        category,
                        types: Vec::new(),
                    },
                    href,
                },
                flags.format,
            )
        }
        CategoryCommands::List => {
            let categories = ctx.service.list_categories().await?;
            output(&categories, flags.format)
        }
        CategoryCommands::Get { slug } => {
            let category = ctx.service.get_category_by_slug(slug).await?;
            output(&category, flags.format)
        }
        CategoryCommands::Delete { slug } => {
            ctx.viewer.require_admin()?;
            ctx.service.delete_category(slug).await?;
            output(&json!({ "deleted": slug }), flags.format)
        }
    }
}
