use clap::Subcommand;

/// Mail commands.
#[derive(Clone, Debug, Subcommand)]
pub enum MailCommands {
    /// List the available templates and their fields.
    Templates,
    /// Render a template locally without sending.
    Preview {
        template: String,
        /// Template data as a JSON object.
        #[arg(long)]
        data: String,
    },
    /// Send a template to one address (admin).
    Send {
        template: String,
        #[arg(long)]
        to: String,
        /// Template data as a JSON object.
        #[arg(long)]
        data: String,
        /// Subject line (defaults to the template's subject).
        #[arg(long)]
        subject: Option<String>,
    },
}
