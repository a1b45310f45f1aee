use chamber_mail::{EmailTemplate, HttpMailer, MailError, Mailer, MemoryMailer};
use serde_json::Value;

/// The mail backend picked from config: the provider when configured,
/// otherwise an in-process outbox that records what would have been sent.
pub enum AppMailer {
    Http(HttpMailer),
    Outbox(MemoryMailer),
}

impl AppMailer {
    /// Whether mail actually leaves the process.
    #[must_use]
    pub const fn delivers(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

impl Mailer for AppMailer {
    async fn send(
        &self,
        template: EmailTemplate,
        data: &Value,
        to: &str,
        subject: &str,
    ) -> Result<u16, MailError> {
        match self {
            Self::Http(mailer) => mailer.send(template, data, to, subject).await,
            Self::Outbox(mailer) => mailer.send(template, data, to, subject).await,
        }
    }
}
