use clap::Subcommand;

/// Session commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SessionCommands {
    /// Start a session for an existing account and remember its token.
    Login {
        #[arg(long)]
        email: String,
    },
    /// End the current session.
    Logout,
    /// Show who is signed in.
    Whoami,
    /// Delete expired sessions (admin).
    Purge,
}
