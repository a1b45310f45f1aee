//! Email templates and their payloads.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::MailError;

/// Template identities known to the mail provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailTemplate {
    EnquiryNotification,
    PasswordReset,
    BusinessVerified,
}

impl EmailTemplate {
    pub const ALL: [Self; 3] = [
        Self::EnquiryNotification,
        Self::PasswordReset,
        Self::BusinessVerified,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EnquiryNotification => "enquiry_notification",
            Self::PasswordReset => "password_reset",
            Self::BusinessVerified => "business_verified",
        }
    }

    /// Fields the payload must carry.
    #[must_use]
    pub const fn required_fields(self) -> &'static [&'static str] {
        match self {
            Self::EnquiryNotification => &["business_name", "sender_name", "sender_email", "message"],
            Self::PasswordReset => &["name", "reset_url"],
            Self::BusinessVerified => &["business_name", "profile_url"],
        }
    }

    const fn body(self) -> &'static str {
        match self {
            Self::EnquiryNotification => {
                "New enquiry for {business_name}\n\nFrom: {sender_name} <{sender_email}>\n\n{message}\n"
            }
            Self::PasswordReset => {
                "Hello {name},\n\nUse the link below to choose a new password:\n{reset_url}\n\nIf you did not ask for this, ignore this email.\n"
            }
            Self::BusinessVerified => {
                "{business_name} is now verified and listed in the directory.\n\nView the profile: {profile_url}\n"
            }
        }
    }

    /// Subject line used when the caller does not supply one.
    #[must_use]
    pub fn default_subject(self, site_name: &str) -> String {
        match self {
            Self::EnquiryNotification => format!("{site_name}: new enquiry"),
            Self::PasswordReset => format!("{site_name}: reset your password"),
            Self::BusinessVerified => format!("{site_name}: your business is verified"),
        }
    }

    /// Check that `data` carries every required field as a string.
    ///
    /// # Errors
    ///
    /// Returns `MailError::MissingField` for the first absent field.
    pub fn check(self, data: &Value) -> Result<(), MailError> {
        for field in self.required_fields() {
            if data.get(field).and_then(Value::as_str).is_none() {
                return Err(MailError::MissingField {
                    template: self.as_str(),
                    field,
                });
            }
        }
        Ok(())
    }

    /// Plain-text body with `{field}` placeholders filled from `data`.
    ///
    /// # Errors
    ///
    /// Returns `MailError::MissingField` if a required field is absent.
    pub fn render(self, data: &Value) -> Result<String, MailError> {
        self.check(data)?;
        let mut text = self.body().to_string();
        for field in self.required_fields() {
            let value = data.get(field).and_then(Value::as_str).unwrap_or_default();
            text = text.replace(&format!("{{{field}}}"), value);
        }
        Ok(text)
    }
}

impl fmt::Display for EmailTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed payloads, one per template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EmailData {
    EnquiryNotification {
        business_name: String,
        sender_name: String,
        sender_email: String,
        message: String,
    },
    PasswordReset {
        name: String,
        reset_url: String,
    },
    BusinessVerified {
        business_name: String,
        profile_url: String,
    },
}

impl EmailData {
    #[must_use]
    pub const fn template(&self) -> EmailTemplate {
        match self {
            Self::EnquiryNotification { .. } => EmailTemplate::EnquiryNotification,
            Self::PasswordReset { .. } => EmailTemplate::PasswordReset,
            Self::BusinessVerified { .. } => EmailTemplate::BusinessVerified,
        }
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
