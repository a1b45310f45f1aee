use clap::Subcommand;

/// Category commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CategoryCommands {
    /// Create a category. The slug is derived from the name.
    Create {
        #[arg(long)]
        name: String,
    },
    /// List categories with their types.
    List,
    /// Get one category by slug.
    Get { slug: String },
    /// Delete an empty category and its types.
    Delete { slug: String },
}

/// Business type commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TypeCommands {
    /// Create a type under a category.
    Create {
        /// Category slug.
        #[arg(long)]
        category: String,
        #[arg(long)]
        name: String,
    },
    /// List the types of a category.
    List { category: String },
}
