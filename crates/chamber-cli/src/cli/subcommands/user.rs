use clap::Subcommand;

/// User commands.
#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    /// Sign up a new member.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// List users (admin).
    List,
    /// Get a user by id or email (admin).
    Get { user: String },
    /// Change a user's role (admin).
    Role { user: String, role: String },
}
