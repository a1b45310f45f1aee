use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail provider is not configured (set mail.endpoint and mail.api_key)")]
    NotConfigured,

    #[error("template '{template}' is missing field '{field}'")]
    MissingField { template: &'static str, field: &'static str },

    #[error("mail transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}
