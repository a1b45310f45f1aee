use clap::Subcommand;

/// Event commands.
#[derive(Clone, Debug, Subcommand)]
pub enum EventCommands {
    /// Create an event (admin).
    Create {
        #[arg(long)]
        title: String,
        /// RFC 3339 or `YYYY-MM-DD HH:MM` (UTC).
        #[arg(long)]
        starts_at: String,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Upcoming events, soonest first.
    List {
        /// Only events starting at or after this time (defaults to now).
        #[arg(long)]
        from: Option<String>,
    },
    /// Get an event by slug.
    Get { slug: String },
}

/// Blog commands.
#[derive(Clone, Debug, Subcommand)]
pub enum BlogCommands {
    /// Write a post (admin).
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
        #[arg(long)]
        publish: bool,
    },
    /// Publish a draft (admin).
    Publish { slug: String },
    /// Published posts, newest first.
    List,
    /// Get a published post by slug.
    Get { slug: String },
}
