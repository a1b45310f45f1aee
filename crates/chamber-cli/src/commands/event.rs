use chamber_core::errors::CoreError;
use chamber_core::forms::{EventForm, parse_datetime_input};
use chamber_core::validation::Validate;
use chrono::Utc;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::EventCommands;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

/// Handle `chamber event`.
pub async fn handle(action: &EventCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        EventCommands::Create {
            title,
            starts_at,
            location,
            description,
        } => {
            ctx.viewer.require_admin()?;
            let form = EventForm {
                title: title.clone(),
                starts_at: starts_at.clone(),
                location: location.clone(),
                description: description.clone(),
            };
            let new = form.validate().into_result()?;
            let event = ctx.service.create_event(&new).await?;
            output(&event, flags.format)
        }
        EventCommands::List { from } => {
            let from = match from {
                Some(raw) => parse_datetime_input(raw)
                    .ok_or_else(|| CoreError::BadRequest(format!("invalid --from time: {raw}")))?,
                None => Utc::now(),
            };
            let limit = effective_limit(None, flags.limit, ctx.config.directory.default_limit);
            let events = ctx.service.list_upcoming_events(from, limit).await?;
            output(&events, flags.format)
        }
        EventCommands::Get { slug } => {
            let event = ctx.service.get_event_by_slug(slug).await?;
            output(&event, flags.format)
        }
    }
}
