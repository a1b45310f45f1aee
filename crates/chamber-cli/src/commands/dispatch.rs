use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Init(args) => commands::init::handle(&args, ctx, flags).await,
        Commands::Directory { action } => commands::directory::handle(&action, ctx, flags).await,
        Commands::Category { action } => commands::category::handle(&action, ctx, flags).await,
        Commands::Type { action } => commands::business_type::handle(&action, ctx, flags).await,
        Commands::Business { action } => commands::business::handle(&action, ctx, flags).await,
        Commands::Service { action } => commands::service::handle(&action, ctx, flags).await,
        Commands::Gallery { action } => commands::gallery::handle(&action, ctx, flags).await,
        Commands::Enquiry { action } => commands::enquiry::handle(&action, ctx, flags).await,
        Commands::Receipt { action } => commands::receipt::handle(&action, ctx, flags).await,
        Commands::Event { action } => commands::event::handle(&action, ctx, flags).await,
        Commands::Blog { action } => commands::blog::handle(&action, ctx, flags).await,
        Commands::User { action } => commands::user::handle(&action, ctx, flags).await,
        Commands::Session { action } => commands::session::handle(&action, ctx, flags).await,
        Commands::Upload(args) => commands::upload::handle(&args, ctx, flags).await,
        Commands::Export(args) => commands::export::handle(&args, ctx, flags).await,
        Commands::Mail { action } => commands::mail::handle(&action, ctx, flags).await,
        Commands::Config { .. } => unreachable!("config is pre-dispatched in main"),
    }
}
