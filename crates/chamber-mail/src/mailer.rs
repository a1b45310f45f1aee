//! Mail transports.

use std::future::Future;

use chamber_config::MailConfig;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::MailError;
use crate::template::EmailTemplate;

/// Sends one transactional email and reports the provider's status code.
pub trait Mailer {
    fn send(
        &self,
        template: EmailTemplate,
        data: &Value,
        to: &str,
        subject: &str,
    ) -> impl Future<Output = Result<u16, MailError>> + Send;
}

/// JSON body posted to the provider.
#[derive(Debug, Serialize)]
pub struct SendRequest<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub subject: &'a str,
    pub template: EmailTemplate,
    pub data: &'a Value,
    /// Rendered fallback for providers without stored templates.
    pub text: String,
}

/// Provider client: `POST {endpoint}` with a bearer key.
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    from: String,
}

impl HttpMailer {
    /// # Errors
    ///
    /// Returns `MailError::NotConfigured` without an endpoint and key.
    pub fn from_config(config: &MailConfig) -> Result<Self, MailError> {
        if !config.is_configured() {
            return Err(MailError::NotConfigured);
        }
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            from: config.from_address.clone(),
        })
    }

    /// Build the request body after checking the payload against the template.
    ///
    /// # Errors
    ///
    /// Returns `MailError::MissingField` for an incomplete payload.
    pub fn request_body<'a>(
        &'a self,
        template: EmailTemplate,
        data: &'a Value,
        to: &'a str,
        subject: &'a str,
    ) -> Result<SendRequest<'a>, MailError> {
        Ok(SendRequest {
            from: &self.from,
            to,
            subject,
            template,
            data,
            text: template.render(data)?,
        })
    }
}

impl Mailer for HttpMailer {
    async fn send(
        &self,
        template: EmailTemplate,
        data: &Value,
        to: &str,
        subject: &str,
    ) -> Result<u16, MailError> {
        let body = self.request_body(template, data, to, subject)?;
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            debug!(%template, to, status = status.as_u16(), "email sent");
        } else {
            warn!(%template, to, status = status.as_u16(), "mail provider rejected email");
        }
        Ok(status.as_u16())
    }
}

/// A message captured by [`MemoryMailer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub template: EmailTemplate,
    pub to: String,
    pub subject: String,
    pub text: String,
}

/// Records messages instead of sending them. Used in tests and when no
/// provider is configured.
pub struct MemoryMailer {
    outbox: Mutex<Vec<SentEmail>>,
    status: u16,
}

impl Default for MemoryMailer {
    fn default() -> Self {
        Self::with_status(202)
    }
}

impl MemoryMailer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `status` for every send, e.g. to simulate provider failures.
    #[must_use]
    pub fn with_status(status: u16) -> Self {
        Self {
            outbox: Mutex::new(Vec::new()),
            status,
        }
    }

    pub async fn sent(&self) -> Vec<SentEmail> {
        self.outbox.lock().await.clone()
    }
}

impl Mailer for MemoryMailer {
    async fn send(
        &self,
        template: EmailTemplate,
        data: &Value,
        to: &str,
        subject: &str,
    ) -> Result<u16, MailError> {
        let text = template.render(data)?;
        self.outbox.lock().await.push(SentEmail {
            template,
            to: to.to_string(),
            subject: subject.to_string(),
            text,
        });
        Ok(self.status)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn verified_data() -> Value {
        json!({ "business_name": "Acme Mart", "profile_url": "https://chamber.test/business/biz-1" })
    }

    fn configured() -> MailConfig {
        MailConfig {
            endpoint: "http://127.0.0.1:9/send".into(),
            api_key: "key".into(),
            from_address: "hello@chamber.test".into(),
        }
    }

    #[tokio::test]
    async fn memory_mailer_records_rendered_message() {
        let mailer = MemoryMailer::new();
        let status = mailer
            .send(EmailTemplate::BusinessVerified, &verified_data(), "owner@acme.test", "Verified")
            .await
            .unwrap();
        assert_eq!(status, 202);

        let sent = mailer.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "owner@acme.test");
        assert!(sent[0].text.contains("Acme Mart is now verified"));
    }

    #[tokio::test]
    async fn memory_mailer_rejects_incomplete_payload() {
        let mailer = MemoryMailer::new();
        let err = mailer
            .send(EmailTemplate::PasswordReset, &json!({ "name": "Ada" }), "a@b.test", "Reset")
            .await
            .unwrap_err();
        assert!(matches!(err, MailError::MissingField { field: "reset_url", .. }));
        assert!(mailer.sent().await.is_empty());
    }

    #[test]
    fn http_mailer_needs_config() {
        assert!(matches!(
            HttpMailer::from_config(&MailConfig::default()),
            Err(MailError::NotConfigured)
        ));
    }

    #[test]
    fn request_body_shape() {
        let mailer = HttpMailer::from_config(&configured()).unwrap();
        let data = verified_data();
        let body = mailer
            .request_body(EmailTemplate::BusinessVerified, &data, "owner@acme.test", "Verified")
            .unwrap();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["from"], "hello@chamber.test");
        assert_eq!(json["template"], "business_verified");
        assert_eq!(json["data"]["business_name"], "Acme Mart");
        assert!(json["text"].as_str().unwrap().contains("View the profile"));
    }

    #[tokio::test]
    async fn unreachable_provider_is_transport_error() {
        let mailer = HttpMailer::from_config(&configured()).unwrap();
        let err = mailer
            .send(EmailTemplate::BusinessVerified, &verified_data(), "owner@acme.test", "Verified")
            .await
            .unwrap_err();
        assert!(matches!(err, MailError::Transport(_)));
    }
}
