use clap::{Args, Subcommand, ValueEnum};

use crate::cli::subcommands::{
    BlogCommands, BusinessCommands, CategoryCommands, ConfigCommands, DirectoryCommands,
    EnquiryCommands, EventCommands, GalleryCommands, MailCommands, ReceiptCommands,
    ServiceCommands, SessionCommands, TypeCommands, UserCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Create the local database and, optionally, the first administrator.
    Init(InitArgs),
    /// Inspect the resolved configuration.
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
    /// Browse the public directory grids.
    Directory {
        #[command(subcommand)]
        action: DirectoryCommands,
    },
    /// Business categories.
    Category {
        #[command(subcommand)]
        action: CategoryCommands,
    },
    /// Business types nested under a category.
    Type {
        #[command(subcommand)]
        action: TypeCommands,
    },
    /// Business profiles.
    Business {
        #[command(subcommand)]
        action: BusinessCommands,
    },
    /// Services listed on a business profile.
    Service {
        #[command(subcommand)]
        action: ServiceCommands,
    },
    /// Gallery images on a business profile.
    Gallery {
        #[command(subcommand)]
        action: GalleryCommands,
    },
    /// Enquiries sent to businesses.
    Enquiry {
        #[command(subcommand)]
        action: EnquiryCommands,
    },
    /// Membership receipts.
    Receipt {
        #[command(subcommand)]
        action: ReceiptCommands,
    },
    /// Chamber events.
    Event {
        #[command(subcommand)]
        action: EventCommands,
    },
    /// Blog posts.
    Blog {
        #[command(subcommand)]
        action: BlogCommands,
    },
    /// User accounts.
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Sign in and out.
    Session {
        #[command(subcommand)]
        action: SessionCommands,
    },
    /// Upload one image file and print its public URL.
    Upload(UploadArgs),
    /// Export back-office data as CSV.
    Export(ExportArgs),
    /// Preview or send transactional email.
    Mail {
        #[command(subcommand)]
        action: MailCommands,
    },
}

/// Arguments for `chamber init`.
#[derive(Clone, Debug, Args)]
pub struct InitArgs {
    /// Name of the first administrator.
    #[arg(long, requires = "admin_email")]
    pub admin_name: Option<String>,
    /// Email of the first administrator.
    #[arg(long, requires = "admin_name")]
    pub admin_email: Option<String>,
}

/// Arguments for `chamber upload`.
#[derive(Clone, Debug, Args)]
pub struct UploadArgs {
    /// Path of the file to upload.
    pub file: String,
    /// Destination folder, e.g. `logos` or `gallery`.
    #[arg(long, default_value = "uploads")]
    pub folder: String,
}

/// What `chamber export` writes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportKind {
    Businesses,
    Receipts,
}

/// Arguments for `chamber export`.
#[derive(Clone, Debug, Args)]
pub struct ExportArgs {
    pub kind: ExportKind,
    /// Write to this file instead of stdout.
    #[arg(long, short = 'o')]
    pub output: Option<String>,
}
