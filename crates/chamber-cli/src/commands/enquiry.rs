use chamber_core::enums::EnquiryStatus;
use chamber_core::forms::EnquiryForm;
use chamber_core::responses::EnquiryCreateResponse;
use chamber_core::validation::Validate;
use chamber_mail::EmailData;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::EnquiryCommands;
use crate::commands::shared::lookup::{contact_address, find_business};
use crate::commands::shared::notify::notify;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `chamber enquiry`.
pub async fn handle(action: &EnquiryCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        EnquiryCommands::Create {
            business,
            message,
            name,
            email,
        } => create(business, message, name.as_deref(), email.as_deref(), ctx, flags).await,
        EnquiryCommands::List { business } => {
            let business = find_business(ctx, business).await?;
            ctx.viewer.require_manager_of(&business)?;
            let enquiries = ctx.service.list_enquiries(&business.id).await?;
            output(&enquiries, flags.format)
        }
        EnquiryCommands::Status { id, status } => {
            let status: EnquiryStatus = parse_enum(status, "status")?;
            let enquiry = ctx.service.get_enquiry(id).await?;
            let business = ctx.service.get_business(&enquiry.business_id).await?;
            ctx.viewer.require_manager_of(&business)?;
            let updated = ctx.service.set_enquiry_status(id, status).await?;
            output(&updated, flags.format)
        }
    }
}

/// Only signed-in members may enquire. The reply-to defaults to the
/// member's own account.
async fn create(
    key: &str,
    message: &str,
    name: Option<&str>,
    email: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let identity = ctx.viewer.require_signed_in()?;
    let business = find_business(ctx, key).await?;
    let sender = ctx.service.get_user(&identity.user_id).await?;

    let form = EnquiryForm {
        business_id: business.id.clone(),
        name: name.map_or_else(|| sender.name.clone(), str::to_string),
        email: email.map_or_else(|| sender.email.clone(), str::to_string),
        message: message.to_string(),
    };
    let new = form.validate().into_result()?;
    let enquiry = ctx.service.create_enquiry(&sender.id, &new).await?;

    let to = contact_address(ctx, &business).await?;
    let data = EmailData::EnquiryNotification {
        business_name: business.name.clone(),
        sender_name: enquiry.name.clone(),
        sender_email: enquiry.email.clone(),
        message: enquiry.message.clone(),
    };
    let notification_status = notify(ctx, &data, &to).await;

    output(
        &EnquiryCreateResponse {
            enquiry,
            notification_status,
        },
        flags.format,
    )
}
