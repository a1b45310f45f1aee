use chamber_core::directory::item::type_href;
use chamber_core::forms::TypeForm;
use chamber_core::validation::Validate;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TypeCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `chamber type`.
pub async fn handle(action: &TypeCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        TypeCommands::Create { category, name } => {
            ctx.viewer.require_admin()?;
            let new = TypeForm {
                category_slug: category.clone(),
                name: name.clone(),
            }
            .validate()
            .into_result()?;
            let business_type = ctx.service.create_business_type(&new).await?;
            let href = type_href(&new.category_slug, &business_type.slug);
            output(&json!({ "type": business_type, "href": href }), flags.format)
        }
        TypeCommands::List { category } => {
            let category = ctx.service.get_category_by_slug(category).await?;
            output(&category.types, flags.format)
        }
    }
}
