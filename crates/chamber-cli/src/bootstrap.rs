use std::path::Path;

use anyhow::Context;
use chamber_config::ChamberConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, then the layered config with `--set` overrides on top of the
/// TOML files, and check cross-field settings.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<ChamberConfig> {
    load_project_dotenv()?;

    let config = ChamberConfig::load_with_overrides(&flags.overrides)
        .context("failed to load chamber configuration")?;
    config.validate().context("invalid chamber configuration")?;

    tracing::debug!(
        database = %config.database.path,
        remote = config.database.is_remote(),
        storage = config.storage.is_configured(),
        mail = config.mail.is_configured(),
        "configuration loaded"
    );
    Ok(config)
}

/// The working directory is already the project root by the time this runs.
fn load_project_dotenv() -> anyhow::Result<()> {
    let env_path = Path::new(".env");
    if env_path.exists() {
        dotenvy::from_path(env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }
    Ok(())
}
