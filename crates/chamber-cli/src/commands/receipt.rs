use chamber_core::export::ReceiptDocument;
use chamber_core::forms::ReceiptForm;
use chamber_core::validation::Validate;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ReceiptCommands;
use crate::commands::shared::limit::truncate_to;
use crate::commands::shared::lookup::find_business;
use crate::context::AppContext;
use crate::output::{output, output_text};

/// Handle `chamber receipt`. Every action is admin-only.
pub async fn handle(action: &ReceiptCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.viewer.require_admin()?;

    match action {
        ReceiptCommands::Issue {
            business,
            amount,
            method,
            description,
        } => {
            let business = find_business(ctx, business).await?;
            let form = ReceiptForm {
                business_id: business.id,
                amount: amount.clone(),
                payment_method: method.clone(),
                description: description.clone(),
            };
            let new = form.validate().into_result()?;
            let receipt = ctx.service.issue_receipt(&new).await?;
            output(&receipt, flags.format)
        }
        ReceiptCommands::List { business } => {
            let business_id = match business {
                Some(key) => Some(find_business(ctx, key).await?.id),
                None => None,
            };
            let receipts = ctx.service.list_receipts(business_id.as_deref()).await?;
            output(&truncate_to(receipts, flags.limit), flags.format)
        }
        ReceiptCommands::Show { receipt, text } => {
            let receipt = ctx.service.get_receipt(receipt).await?;
            let business = ctx.service.get_business(&receipt.business_id).await?;
            let document = ReceiptDocument::new(&ctx.config.site.name, &receipt, &business);
            if *text {
                output_text(&document.to_text());
                Ok(())
            } else {
                output(&document, flags.format)
            }
        }
    }
}
