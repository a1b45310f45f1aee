use clap::Subcommand;

/// Enquiry commands.
#[derive(Clone, Debug, Subcommand)]
pub enum EnquiryCommands {
    /// Send an enquiry to a business and notify its owner.
    Create {
        /// Business id or slug.
        business: String,
        #[arg(long)]
        message: String,
        /// Reply-to name (defaults to the signed-in user).
        #[arg(long)]
        name: Option<String>,
        /// Reply-to email (defaults to the signed-in user).
        #[arg(long)]
        email: Option<String>,
    },
    /// Enquiries received by a business.
    List { business: String },
    /// Move an enquiry to `answered` or `closed`.
    Status { id: String, status: String },
}
