use clap::Subcommand;

/// Configuration commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the resolved configuration with secrets masked.
    Show,
    /// Print the config file locations that are consulted.
    Paths,
}
