use anyhow::Context;
use chamber_auth::{SessionCookie, resolve_user_id};
use chamber_config::SiteConfig;
use chamber_core::errors::CoreError;
use chamber_core::identity::SessionToken;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SessionCommands;
use crate::context::{AppContext, session_file};
use crate::output::output;

/// Handle `chamber session`.
///
/// The CLI operator already holds the database, so `login` asks only for
/// the account email. The token is kept in `.chamber/session`; the matching
/// `Set-Cookie` value is printed for carrying the session into a browser.
pub async fn handle(action: &SessionCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        SessionCommands::Login { email } => {
            let email = email.trim().to_lowercase();
            let user = ctx
                .service
                .get_user_by_email(&email)
                .await?
                .ok_or_else(|| CoreError::not_found("user", &email))?;
            let token = ctx.service.start_session(&user.id).await?;
            session_file::store(&token).context("failed to save session token")?;
            tracing::info!(user = %user.id, "signed in");

            output(
                &json!({
                    "user": user,
                    "session_path": session_file::session_path(),
                    "ttl_hours": ctx.config.site.session_ttl_hours,
                    "set_cookie": login_cookie(&ctx.config.site, &token),
                }),
                flags.format,
            )
        }
        SessionCommands::Logout => {
            let user_id = resolve_user_id(&ctx.service, ctx.session_token.as_ref()).await?;
            if let Some(token) = &ctx.session_token {
                ctx.service.end_session(token).await?;
            }
            let removed = session_file::delete()?;
            output(
                &json!({
                    "signed_out": user_id,
                    "session_file_removed": removed,
                    "set_cookie": site_cookie(&ctx.config.site).clear(),
                }),
                flags.format,
            )
        }
        SessionCommands::Whoami => output(
            &json!({
                "viewer": ctx.viewer,
                "enquire_action": ctx.viewer.enquire_action(),
            }),
            flags.format,
        ),
        SessionCommands::Purge => {
            ctx.viewer.require_admin()?;
            let purged = ctx.service.purge_expired_sessions().await?;
            output(&json!({ "purged": purged }), flags.format)
        }
    }
}

/// `Secure` is only set when the site is served over https.
fn site_cookie(site: &SiteConfig) -> SessionCookie {
    let cookie = SessionCookie::new(site.session_cookie_name.as_str());
    if site.base_url.starts_with("https://") {
        cookie
    } else {
        cookie.insecure()
    }
}

fn login_cookie(site: &SiteConfig, token: &SessionToken) -> String {
    site_cookie(site).set(token, i64::from(site.session_ttl_hours) * 3600)
}
