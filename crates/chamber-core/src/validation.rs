//! Typed form validation.
//!
//! A form validates into `Validation::Valid(data)` or
//! `Validation::Invalid(errors)`, where `errors` maps field names to the
//! message displayed next to that field. Only the first failure per field is
//! kept.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Field name to message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field` unless the field already has one.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Valid(value)` if nothing was recorded, otherwise `Invalid(self)`.
    pub fn finish<T>(self, value: impl FnOnce() -> T) -> Validation<T> {
        if self.is_empty() {
            Validation::Valid(value())
        } else {
            Validation::Invalid(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        f.write_str(&parts.join("; "))
    }
}

/// Outcome of validating a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Validation<T> {
    Valid(T),
    Invalid(FieldErrors),
}

impl<T> Validation<T> {
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Validation<U> {
        match self {
            Self::Valid(value) => Validation::Valid(f(value)),
            Self::Invalid(errors) => Validation::Invalid(errors),
        }
    }

    /// Convert into a `Result` for callers that propagate with `?`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidForm` carrying the field errors.
    pub fn into_result(self) -> Result<T, CoreError> {
        match self {
            Self::Valid(value) => Ok(value),
            Self::Invalid(errors) => Err(CoreError::InvalidForm(errors)),
        }
    }
}

/// A raw form that can be checked into typed data.
pub trait Validate {
    type Output;

    fn validate(&self) -> Validation<Self::Output>;
}

// ---------------------------------------------------------------------------
// Field rules
// ---------------------------------------------------------------------------

/// Trimmed value, or an error if it is empty.
pub fn required(errors: &mut FieldErrors, field: &str, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, "This field is required");
    }
    trimmed.to_string()
}

/// Require a trimmed length within `min..=max` characters.
pub fn length(errors: &mut FieldErrors, field: &str, value: &str, min: usize, max: usize) {
    let count = value.trim().chars().count();
    if count < min {
        errors.add(field, format!("Must be at least {min} characters"));
    } else if count > max {
        errors.add(field, format!("Must be at most {max} characters"));
    }
}

/// Loose email shape check: one `@`, non-empty local part, dotted domain.
pub fn email(errors: &mut FieldErrors, field: &str, value: &str) {
    if !looks_like_email(value.trim()) {
        errors.add(field, "Enter a valid email address");
    }
}

/// Require an absolute `http://` or `https://` URL.
pub fn url(errors: &mut FieldErrors, field: &str, value: &str) {
    let value = value.trim();
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    if !rest.is_some_and(|host| !host.is_empty() && !host.contains(char::is_whitespace)) {
        errors.add(field, "Enter a valid URL starting with http:// or https://");
    }
}

/// Digits plus `+ - ( )` and spaces, with at least 7 digits.
pub fn phone(errors: &mut FieldErrors, field: &str, value: &str) {
    let value = value.trim();
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | ' '));
    let digits = value.chars().filter(char::is_ascii_digit).count();
    if !allowed || digits < 7 {
        errors.add(field, "Enter a valid phone number");
    }
}

/// `Some(trimmed)` for non-blank input, `None` otherwise.
#[must_use]
pub fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.contains(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn first_error_per_field_wins() {
        let mut errors = FieldErrors::new();
        errors.add("name", "This field is required");
        errors.add("name", "Must be at least 2 characters");
        assert_eq!(errors.get("name"), Some("This field is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn finish_reports_valid_only_without_errors() {
        let ok = FieldErrors::new().finish(|| 42);
        assert_eq!(ok, Validation::Valid(42));

        let mut errors = FieldErrors::new();
        errors.add("email", "bad");
        let bad = errors.finish(|| 42);
        assert!(!bad.is_valid());
    }

    #[test]
    fn invalid_into_result_is_invalid_form() {
        let mut errors = FieldErrors::new();
        errors.add("email", "Enter a valid email address");
        let err = errors.finish(|| ()).into_result().unwrap_err();
        assert_eq!(err.status(), 422);
        assert!(err.to_string().contains("email: Enter a valid email address"));
    }

    #[rstest]
    #[case("owner@acme.test", true)]
    #[case("a.b+c@mail.example.org", true)]
    #[case("no-at-sign", false)]
    #[case("@acme.test", false)]
    #[case("owner@localhost", false)]
    #[case("owner@acme.", false)]
    #[case("two@@acme.test", false)]
    #[case("sp ace@acme.test", false)]
    fn email_rule(#[case] input: &str, #[case] valid: bool) {
        let mut errors = FieldErrors::new();
        email(&mut errors, "email", input);
        assert_eq!(errors.is_empty(), valid, "{input}");
    }

    #[rstest]
    #[case("https://acme.test", true)]
    #[case("http://acme.test/about", true)]
    #[case("ftp://acme.test", false)]
    #[case("https://", false)]
    #[case("acme.test", false)]
    fn url_rule(#[case] input: &str, #[case] valid: bool) {
        let mut errors = FieldErrors::new();
        url(&mut errors, "website", input);
        assert_eq!(errors.is_empty(), valid, "{input}");
    }

    #[rstest]
    #[case("+44 (0) 1234 567890", true)]
    #[case("555-1234", true)]
    #[case("12345", false)]
    #[case("call me", false)]
    fn phone_rule(#[case] input: &str, #[case] valid: bool) {
        let mut errors = FieldErrors::new();
        phone(&mut errors, "phone", input);
        assert_eq!(errors.is_empty(), valid, "{input}");
    }

    #[test]
    fn length_bounds() {
        let mut errors = FieldErrors::new();
        length(&mut errors, "name", "a", 2, 5);
        assert_eq!(errors.get("name"), Some("Must be at least 2 characters"));

        let mut errors = FieldErrors::new();
        length(&mut errors, "name", "abcdef", 2, 5);
        assert_eq!(errors.get("name"), Some("Must be at most 5 characters"));
    }

    #[test]
    fn optional_drops_blank() {
        assert_eq!(optional(Some("  ")), None);
        assert_eq!(optional(Some(" x ")), Some("x".to_string()));
        assert_eq!(optional(None), None);
    }

    #[test]
    fn invalid_serializes_field_map() {
        let mut errors = FieldErrors::new();
        errors.add("name", "This field is required");
        let json = serde_json::to_value(Validation::<()>::Invalid(errors)).unwrap();
        assert_eq!(json["status"], "invalid");
        assert_eq!(json["data"]["name"], "This field is required");
    }
}
