use chamber_mail::{EmailTemplate, Mailer};
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::MailCommands;
use crate::commands::shared::parse::{parse_enum, parse_json_object};
use crate::context::AppContext;
use crate::output::output;

/// Handle `chamber mail`.
pub async fn handle(action: &MailCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        MailCommands::Templates => {
            let templates: Vec<_> = EmailTemplate::ALL
                .iter()
                .map(|t| json!({ "template": t.as_str(), "fields": t.required_fields() }))
                .collect();
            output(&templates, flags.format)
        }
        MailCommands::Preview { template, data } => {
            let template: EmailTemplate = parse_enum(template, "template")?;
            let data = parse_json_object(data, "data")?;
            let text = template.render(&data)?;
            output(
                &json!({
                    "template": template.as_str(),
                    "subject": template.default_subject(&ctx.config.site.name),
                    "text": text,
                }),
                flags.format,
            )
        }
        MailCommands::Send {
            template,
            to,
            data,
            subject,
        } => {
            ctx.viewer.require_admin()?;
            let template: EmailTemplate = parse_enum(template, "template")?;
            let data = parse_json_object(data, "data")?;
            template.check(&data)?;
            let subject = subject
                .clone()
                .unwrap_or_else(|| template.default_subject(&ctx.config.site.name));
            let status = ctx.mailer.send(template, &data, to, &subject).await?;
            output(
                &json!({
                    "status": status,
                    "delivered": ctx.mailer.delivers(),
                }),
                flags.format,
            )
        }
    }
}
