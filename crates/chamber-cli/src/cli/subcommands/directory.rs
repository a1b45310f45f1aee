use chamber_core::directory::CompositionPolicy;
use clap::{Args, Subcommand, ValueEnum};

/// Directory browsing commands.
#[derive(Clone, Debug, Subcommand)]
pub enum DirectoryCommands {
    /// Category grid, led by the "All" tile.
    Categories {
        #[arg(long)]
        query: Option<String>,
    },
    /// Type grid for one category.
    Types {
        category: String,
        #[arg(long)]
        query: Option<String>,
    },
    /// Business grid narrowed by name, category, and type.
    Businesses(BusinessGridArgs),
    /// Gallery grid of one business.
    Gallery {
        /// Business id or slug.
        business: String,
        /// Match against image captions.
        #[arg(long)]
        query: Option<String>,
    },
}

/// Filters for `chamber directory businesses`.
#[derive(Clone, Debug, Args)]
pub struct BusinessGridArgs {
    #[arg(long)]
    pub query: Option<String>,
    /// Category slug, or `all`.
    #[arg(long)]
    pub category: Option<String>,
    /// Type slug within the category, or `all`.
    #[arg(long = "type")]
    pub business_type: Option<String>,
    /// How the query and the selections combine (defaults to config).
    ///
    /// With `latest-wins` a category or type selection replaces the query
    /// result, so `--query` only takes effect without `--category`. Use
    /// `conjunctive` to apply both.
    #[arg(long)]
    pub policy: Option<PolicyArg>,
    /// Include businesses that are not yet verified.
    #[arg(long)]
    pub include_unverified: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum PolicyArg {
    LatestWins,
    Conjunctive,
}

impl From<PolicyArg> for CompositionPolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::LatestWins => Self::LatestWins,
            PolicyArg::Conjunctive => Self::Conjunctive,
        }
    }
}
