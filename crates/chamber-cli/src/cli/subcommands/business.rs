use clap::{Args, Subcommand};

/// Editable profile fields shared by `create` and `update`.
#[derive(Clone, Debug, Args)]
pub struct BusinessFields {
    #[arg(long)]
    pub name: String,
    /// Type as `category/type` slugs, or a type id.
    #[arg(long = "type")]
    pub business_type: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub website: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
}

/// Business commands.
#[derive(Clone, Debug, Subcommand)]
pub enum BusinessCommands {
    /// Register a business owned by the signed-in user.
    Create(BusinessFields),
    /// Public profile by id or slug.
    Get { business: String },
    /// Replace the editable profile fields.
    Update {
        business: String,
        #[command(flatten)]
        fields: BusinessFields,
    },
    /// Verify a business (admin), or revoke verification.
    Verify {
        business: String,
        #[arg(long)]
        revoke: bool,
    },
    /// Businesses waiting for verification (admin).
    Pending,
    /// Businesses owned by the signed-in user.
    Mine,
    /// Upload and set the logo.
    Logo {
        business: String,
        /// Image file path.
        file: String,
    },
}

/// Service commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ServiceCommands {
    /// Add a service to a business.
    Add {
        business: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// Image file to upload for the service.
        #[arg(long)]
        image: Option<String>,
    },
    /// List a business's services.
    List { business: String },
    /// Remove a service.
    Remove { business: String, service: String },
}

/// Gallery commands.
#[derive(Clone, Debug, Subcommand)]
pub enum GalleryCommands {
    /// Upload an image into a business's gallery.
    Add {
        business: String,
        /// Image file path.
        file: String,
        #[arg(long)]
        caption: Option<String>,
    },
    /// List a business's gallery.
    List { business: String },
    /// Remove an image and its stored file.
    Remove { business: String, image: String },
}
