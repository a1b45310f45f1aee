mod create;
mod get;
mod logo;
mod update;
mod verify;

use chamber_core::forms::{BusinessForm, BusinessProfile};
use chamber_core::validation::Validate;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{BusinessCommands, BusinessFields};
use crate::commands::shared::lookup::resolve_type;
use crate::context::AppContext;
use crate::output::output;

/// Handle `chamber business`.
pub async fn handle(action: &BusinessCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        BusinessCommands::Create(fields) => create::run(fields, ctx, flags).await,
        BusinessCommands::Get { business } => get::run(business, ctx, flags).await,
        BusinessCommands::Update { business, fields } => update::run(business, fields, ctx, flags).await,
        BusinessCommands::Verify { business, revoke } => verify::run(business, *revoke, ctx, flags).await,
        BusinessCommands::Pending => {
            ctx.viewer.require_admin()?;
            let businesses = ctx.service.list_unverified_businesses().await?;
            output(&businesses, flags.format)
        }
        BusinessCommands::Mine => {
            let identity = ctx.viewer.require_signed_in()?;
            let businesses = ctx.service.list_businesses_by_owner(&identity.user_id).await?;
            output(&businesses, flags.format)
        }
        BusinessCommands::Logo { business, file } => logo::run(business, file, ctx, flags).await,
    }
}

/// Validate the shared profile flags. The logo is managed separately.
async fn validate_profile(
    fields: &BusinessFields,
    logo_url: Option<String>,
    ctx: &AppContext,
) -> anyhow::Result<BusinessProfile> {
    let business_type = resolve_type(ctx, &fields.business_type).await?;
    let form = BusinessForm {
        name: fields.name.clone(),
        type_id: business_type.id,
        description: fields.description.clone(),
        email: fields.email.clone(),
        phone: fields.phone.clone(),
        website: fields.website.clone(),
        address: fields.address.clone(),
        logo_url,
    };
    Ok(form.validate().into_result()?)
}
