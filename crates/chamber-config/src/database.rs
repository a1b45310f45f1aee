//! libSQL database configuration.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    String::from(".chamber/chamber.db")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Local database file. `":memory:"` for throwaway runs.
    #[serde(default = "default_path")]
    pub path: String,

    /// Remote database URL (e.g., `libsql://chamber.turso.io`). Empty for local only.
    #[serde(default)]
    pub url: String,

    /// Auth token for the remote database.
    #[serde(default)]
    pub auth_token: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            url: String::new(),
            auth_token: String::new(),
        }
    }
}

impl DatabaseConfig {
    /// Check if a remote database is configured.
    pub fn is_remote(&self) -> bool {
        !self.url.is_empty() && !self.auth_token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_local() {
        let config = DatabaseConfig::default();
        assert!(!config.is_remote());
        assert_eq!(config.path, ".chamber/chamber.db");
    }

    #[test]
    fn remote_needs_url_and_token() {
        let config = DatabaseConfig {
            url: "libsql://chamber.turso.io".into(),
            ..Default::default()
        };
        assert!(!config.is_remote());
        let config = DatabaseConfig {
            auth_token: "tok".into(),
            ..config
        };
        assert!(config.is_remote());
    }
}
