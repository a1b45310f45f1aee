//! Transactional email provider configuration.

use serde::{Deserialize, Serialize};

fn default_from_address() -> String {
    String::from("no-reply@chamber.local")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// HTTP endpoint that accepts `POST` send requests.
    #[serde(default)]
    pub endpoint: String,

    /// Bearer token for the provider.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_from_address")]
    pub from_address: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            from_address: default_from_address(),
        }
    }
}

impl MailConfig {
    /// Check if the mail config has the minimum required fields.
    pub fn is_configured(&self) -> bool {
        !self.endpoint.is_empty() && !self.api_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn needs_endpoint_and_key() {
        let mut config = MailConfig::default();
        assert!(!config.is_configured());
        config.endpoint = "https://mail.example/send".into();
        assert!(!config.is_configured());
        config.api_key = "k".into();
        assert!(config.is_configured());
    }
}
