//! # chamber-config
//!
//! Layered configuration loading for Chamber using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CHAMBER_*` prefix, `__` as separator)
//! 2. Overrides passed on the command line (`--set key=value`)
//! 3. Project-level `.chamber/config.toml`
//! 4. User-level `~/.config/chamber/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! `CHAMBER_MAIL__API_KEY` maps to `mail.api_key`, `CHAMBER_DIRECTORY__FIRST_ROW`
//! to `directory.first_row`, and so on.
//!
//! ```no_run
//! use chamber_config::ChamberConfig;
//!
//! let config = ChamberConfig::load_with_dotenv().expect("config");
//! if config.storage.is_configured() {
//!     println!("uploads go to {}", config.storage.bucket);
//! }
//! ```

mod database;
mod directory;
mod error;
mod mail;
mod site;
mod storage;

pub use database::DatabaseConfig;
pub use directory::DirectoryConfig;
pub use error::ConfigError;
pub use mail::MailConfig;
pub use site::SiteConfig;
pub use storage::StorageConfig;

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
    value::Value,
};
use serde::{Deserialize, Serialize};

/// Prefix shared by every environment variable the loader reads.
pub const ENV_PREFIX: &str = "CHAMBER_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ChamberConfig {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub mail: MailConfig,
    #[serde(default)]
    pub directory: DirectoryConfig,
}

impl ChamberConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source fails to parse or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_overrides(&[])
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Load configuration with extra `dotted.key = value` overrides that sit
    /// above the TOML files and below the process environment.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_overrides(overrides: &[(String, String)]) -> Result<Self, ConfigError> {
        let mut figment = Self::file_figment();
        for (key, value) in overrides {
            // Same scalar parsing as env values, so "3" lands as an integer.
            let value: Value = value.parse().unwrap_or_else(|_| Value::from(value.clone()));
            figment = figment.merge(Serialized::default(key, value));
        }
        figment
            .merge(Self::env_provider())
            .extract()
            .map_err(ConfigError::from)
    }

    /// Build the full provider chain.
    ///
    /// Public so tests can inspect the figment or layer more providers on top.
    pub fn figment() -> Figment {
        Self::file_figment().merge(Self::env_provider())
    }

    /// Defaults plus the global and project TOML files.
    fn file_figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = Self::project_config_path();
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment
    }

    fn env_provider() -> Env {
        Env::prefixed(ENV_PREFIX).split("__")
    }

    /// Path to the user-global config file.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("chamber").join("config.toml"))
    }

    /// Path to the project-local config file, relative to the working directory.
    pub fn project_config_path() -> PathBuf {
        PathBuf::from(".chamber/config.toml")
    }

    /// Copy with secrets masked, for `chamber config show`.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        mask(&mut copy.database.auth_token);
        mask(&mut copy.storage.secret_access_key);
        mask(&mut copy.mail.api_key);
        copy
    }

    /// Validate cross-field settings that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for zero grid rows, an empty
    /// cookie name, or a zero session lifetime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.directory.row_sizes()?;
        if self.site.session_cookie_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "site.session_cookie_name".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.site.session_ttl_hours == 0 {
            return Err(ConfigError::InvalidValue {
                field: "site.session_ttl_hours".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if set) looking for a `.env` file,
    /// then falls back to the current directory. Missing files are ignored.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                if try_dotenv(&dir) {
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

fn try_dotenv(dir: &Path) -> bool {
    let env_path = dir.join(".env");
    env_path.exists() && dotenvy::from_path(&env_path).is_ok()
}

fn mask(secret: &mut String) {
    if !secret.is_empty() {
        *secret = String::from("********");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = ChamberConfig::default();
        assert!(!config.storage.is_configured());
        assert!(!config.mail.is_configured());
        assert!(!config.database.is_remote());
        assert_eq!(config.directory.default_limit, 50);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: ChamberConfig = ChamberConfig::figment().extract()?;
            assert_eq!(config.site.session_cookie_name, "chamber_session");
            assert!(config.validate().is_ok());
            Ok(())
        });
    }

    #[test]
    fn redacted_masks_only_set_secrets() {
        let mut config = ChamberConfig::default();
        config.mail.api_key = "live-key".into();
        let shown = config.redacted();
        assert_eq!(shown.mail.api_key, "********");
        assert_eq!(shown.storage.secret_access_key, "");
    }

    #[test]
    fn validate_rejects_empty_cookie_name() {
        let mut config = ChamberConfig::default();
        config.site.session_cookie_name = "  ".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "site.session_cookie_name"
        ));
    }
}
