use chamber_config::ChamberConfig;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ConfigCommands;
use crate::output::output;

/// Handle `chamber config`. Runs before the database is opened.
pub fn handle(action: &ConfigCommands, config: &ChamberConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        ConfigCommands::Show => output(&config.redacted(), flags.format),
        ConfigCommands::Paths => {
            let project = ChamberConfig::project_config_path();
            output(
                &json!({
                    "global": ChamberConfig::global_config_path(),
                    "project_exists": project.exists(),
                    "project": project,
                }),
                flags.format,
            )
        }
    }
}
