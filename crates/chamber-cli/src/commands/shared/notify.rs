use chamber_mail::{EmailData, send_data};

use crate::context::AppContext;

/// Send a notification, logging instead of failing the command.
///
/// Returns the provider status, or `None` if the send failed.
pub async fn notify(ctx: &AppContext, data: &EmailData, to: &str) -> Option<u16> {
    match send_data(&ctx.mailer, data, to, &ctx.config.site.name).await {
        Ok(status) => {
            if !ctx.mailer.delivers() {
                tracing::info!(template = %data.template(), to, "mail provider not configured; notification kept in memory");
            }
            Some(status)
        }
        Err(error) => {
            tracing::warn!(%error, template = %data.template(), to, "failed to send notification");
            None
        }
    }
}
