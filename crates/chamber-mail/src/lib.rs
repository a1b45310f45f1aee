//! # chamber-mail
//!
//! Transactional email for Chamber: enquiry notifications to business owners,
//! password resets, and verification notices.
//!
//! [`Mailer`] is the seam. [`HttpMailer`] posts to the configured provider with
//! `reqwest`; [`MemoryMailer`] captures messages for tests and for runs without
//! a provider.

pub mod error;
pub mod mailer;
pub mod template;

pub use error::MailError;
pub use mailer::{HttpMailer, Mailer, MemoryMailer, SentEmail};
pub use template::{EmailData, EmailTemplate};

use serde_json::Value;

/// Send a typed payload with the template's default subject.
///
/// # Errors
///
/// Propagates the mailer's error.
pub async fn send_data<M: Mailer>(
    mailer: &M,
    data: &EmailData,
    to: &str,
    site_name: &str,
) -> Result<u16, MailError> {
    let template = data.template();
    let payload: Value = data.to_value();
    mailer
        .send(template, &payload, to, &template.default_subject(site_name))
        .await
}
