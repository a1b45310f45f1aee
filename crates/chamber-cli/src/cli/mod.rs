use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// `chamber`: directory, membership, and back-office commands.
#[derive(Debug, Parser)]
#[command(
    name = "chamber",
    version,
    about = "Chamber - business directory and membership back office"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// json (default), table (grids as tile rows), or raw single-line json
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Cap on listed rows (events, posts, users, receipts)
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log at debug level unless CHAMBER_LOG is set
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding `.chamber/` (defaults to the current directory)
    #[arg(short, long, global = true)]
    pub project: Option<String>,

    /// Override a config value, e.g. `--set directory.first_row=3`
    #[arg(long = "set", global = true, value_name = "KEY=VALUE", value_parser = global::parse_key_value)]
    pub overrides: Vec<(String, String)>,
}

impl Cli {
    /// Flags every handler receives.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            project: self.project.clone(),
            overrides: self.overrides.clone(),
        }
    }
}
