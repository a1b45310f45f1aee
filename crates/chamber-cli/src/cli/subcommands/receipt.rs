use clap::Subcommand;

/// Receipt commands (admin).
#[derive(Clone, Debug, Subcommand)]
pub enum ReceiptCommands {
    /// Issue a receipt with the next number for this year.
    Issue {
        /// Business id or slug.
        #[arg(long)]
        business: String,
        /// Decimal amount, e.g. `120.50`.
        #[arg(long)]
        amount: String,
        /// cash, card, bank_transfer, or cheque.
        #[arg(long)]
        method: String,
        #[arg(long)]
        description: String,
    },
    /// List receipts, optionally for one business.
    List {
        #[arg(long)]
        business: Option<String>,
    },
    /// Show one receipt as a printable document.
    Show {
        /// Receipt id or number.
        receipt: String,
        /// Print the plain-text rendering instead of structured output.
        #[arg(long)]
        text: bool,
    },
}
