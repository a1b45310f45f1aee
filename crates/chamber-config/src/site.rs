//! Site identity and session cookie settings.

use serde::{Deserialize, Serialize};

fn default_name() -> String {
    String::from("Chamber of Commerce")
}

fn default_description() -> String {
    String::from("Business directory and membership for the regional chamber of commerce")
}

fn default_cookie_name() -> String {
    String::from("chamber_session")
}

fn default_base_url() -> String {
    String::from("http://localhost:3000")
}

/// Thirty days.
const fn default_session_ttl_hours() -> u32 {
    720
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    /// Display name used in page titles, emails, and receipts.
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_description")]
    pub description: String,

    /// Name of the cookie carrying the session token.
    #[serde(default = "default_cookie_name")]
    pub session_cookie_name: String,

    /// Public origin, used to build absolute links in emails.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            description: default_description(),
            session_cookie_name: default_cookie_name(),
            base_url: default_base_url(),
            session_ttl_hours: default_session_ttl_hours(),
        }
    }
}

impl SiteConfig {
    /// Absolute URL for a site path such as `/business/biz-1`.
    #[must_use]
    pub fn absolute_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
