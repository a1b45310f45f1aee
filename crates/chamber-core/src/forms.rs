//! Submitted forms and the typed data they validate into.
//!
//! Form structs hold raw strings exactly as posted. `Validate::validate`
//! trims, checks, and converts them; repositories only accept the validated
//! `New*` / profile types.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::PaymentMethod;
use crate::slug::slugify;
use crate::validation::{FieldErrors, Validate, Validation, email, length, optional, phone, required, url};

const NAME_MAX: usize = 120;
const TEXT_MAX: usize = 5000;

/// Require that a name produces a non-empty slug.
fn sluggable(errors: &mut FieldErrors, field: &str, name: &str) -> String {
    let slug = slugify(name.trim());
    if slug.is_empty() && !name.trim().is_empty() {
        errors.add(field, "Must contain at least one letter or digit");
    }
    slug
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub name: String,
    /// Lowercased.
    pub email: String,
}

impl Validate for SignUpForm {
    type Output = NewUser;

    fn validate(&self) -> Validation<NewUser> {
        let mut errors = FieldErrors::new();
        let name = required(&mut errors, "name", &self.name);
        length(&mut errors, "name", &name, 2, NAME_MAX);
        let address = required(&mut errors, "email", &self.email);
        email(&mut errors, "email", &address);
        errors.finish(|| NewUser {
            name,
            email: address.to_lowercase(),
        })
    }
}

// ---------------------------------------------------------------------------
// Categories and types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryForm {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
}

impl Validate for CategoryForm {
    type Output = NewCategory;

    fn validate(&self) -> Validation<NewCategory> {
        let mut errors = FieldErrors::new();
        let name = required(&mut errors, "name", &self.name);
        length(&mut errors, "name", &name, 2, NAME_MAX);
        let slug = sluggable(&mut errors, "name", &name);
        errors.finish(|| NewCategory { name, slug })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TypeForm {
    pub category_slug: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewBusinessType {
    pub category_slug: String,
    pub name: String,
    pub slug: String,
}

impl Validate for TypeForm {
    type Output = NewBusinessType;

    fn validate(&self) -> Validation<NewBusinessType> {
        let mut errors = FieldErrors::new();
        let category_slug = required(&mut errors, "category_slug", &self.category_slug);
        let name = required(&mut errors, "name", &self.name);
        length(&mut errors, "name", &name, 2, NAME_MAX);
        let slug = sluggable(&mut errors, "name", &name);
        errors.finish(|| NewBusinessType {
            category_slug,
            name,
            slug,
        })
    }
}

// ---------------------------------------------------------------------------
// Businesses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BusinessForm {
    pub name: String,
    pub type_id: String,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub logo_url: Option<String>,
}

/// Validated editable fields of a business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusinessProfile {
    pub name: String,
    pub slug: String,
    pub type_id: String,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub logo_url: Option<String>,
}

impl Validate for BusinessForm {
    type Output = BusinessProfile;

    fn validate(&self) -> Validation<BusinessProfile> {
        let mut errors = FieldErrors::new();
        let name = required(&mut errors, "name", &self.name);
        length(&mut errors, "name", &name, 2, NAME_MAX);
        let slug = sluggable(&mut errors, "name", &name);
        let type_id = required(&mut errors, "type_id", &self.type_id);

        let description = optional(self.description.as_deref());
        if let Some(text) = &description {
            length(&mut errors, "description", text, 0, TEXT_MAX);
        }
        let contact_email = optional(self.email.as_deref());
        if let Some(address) = &contact_email {
            email(&mut errors, "email", address);
        }
        let contact_phone = optional(self.phone.as_deref());
        if let Some(number) = &contact_phone {
            phone(&mut errors, "phone", number);
        }
        let website = optional(self.website.as_deref());
        if let Some(link) = &website {
            url(&mut errors, "website", link);
        }
        let logo_url = optional(self.logo_url.as_deref());
        if let Some(link) = &logo_url {
            url(&mut errors, "logo_url", link);
        }

        errors.finish(|| BusinessProfile {
            name,
            slug,
            type_id,
            description,
            email: contact_email.map(|e| e.to_lowercase()),
            phone: contact_phone,
            website,
            address: optional(self.address.as_deref()),
            logo_url,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceForm {
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewService {
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl Validate for ServiceForm {
    type Output = NewService;

    fn validate(&self) -> Validation<NewService> {
        let mut errors = FieldErrors::new();
        let title = required(&mut errors, "title", &self.title);
        length(&mut errors, "title", &title, 2, NAME_MAX);
        let image_url = optional(self.image_url.as_deref());
        if let Some(link) = &image_url {
            url(&mut errors, "image_url", link);
        }
        errors.finish(|| NewService {
            title,
            description: optional(self.description.as_deref()),
            image_url,
        })
    }
}

// ---------------------------------------------------------------------------
// Enquiries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnquiryForm {
    pub business_id: String,
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewEnquiry {
    pub business_id: String,
    pub name: String,
    pub email: String,
    pub message: String,
}

impl Validate for EnquiryForm {
    type Output = NewEnquiry;

    fn validate(&self) -> Validation<NewEnquiry> {
        let mut errors = FieldErrors::new();
        let business_id = required(&mut errors, "business_id", &self.business_id);
        let name = required(&mut errors, "name", &self.name);
        let address = required(&mut errors, "email", &self.email);
        email(&mut errors, "email", &address);
        let message = required(&mut errors, "message", &self.message);
        length(&mut errors, "message", &message, 10, 2000);
        errors.finish(|| NewEnquiry {
            business_id,
            name,
            email: address.to_lowercase(),
            message,
        })
    }
}

// ---------------------------------------------------------------------------
// Receipts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReceiptForm {
    pub business_id: String,
    /// Decimal amount as typed, e.g. `"120.50"`.
    pub amount: String,
    pub payment_method: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewReceipt {
    pub business_id: String,
    pub amount_cents: i64,
    pub payment_method: PaymentMethod,
    pub description: String,
}

impl Validate for ReceiptForm {
    type Output = NewReceipt;

    fn validate(&self) -> Validation<NewReceipt> {
        let mut errors = FieldErrors::new();
        let business_id = required(&mut errors, "business_id", &self.business_id);
        let amount = required(&mut errors, "amount", &self.amount);
        let amount_cents = parse_amount_cents(&amount);
        match amount_cents {
            Some(cents) if cents > 0 => {}
            _ => errors.add("amount", "Enter a positive amount with at most two decimals"),
        }
        let method_raw = required(&mut errors, "payment_method", &self.payment_method);
        let payment_method = parse_payment_method(&method_raw);
        if payment_method.is_none() {
            errors.add("payment_method", "Choose cash, card, bank transfer, or cheque");
        }
        let description = required(&mut errors, "description", &self.description);
        length(&mut errors, "description", &description, 2, 500);

        match (amount_cents, payment_method) {
            (Some(amount_cents), Some(payment_method)) => errors.finish(|| NewReceipt {
                business_id,
                amount_cents,
                payment_method,
                description,
            }),
            _ => Validation::Invalid(errors),
        }
    }
}

/// Parse `"120"`, `"120.5"`, or `"120.50"` into cents.
#[must_use]
pub fn parse_amount_cents(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let (whole, fraction) = raw.split_once('.').unwrap_or((raw, ""));
    if whole.is_empty() || fraction.len() > 2 {
        return None;
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let whole: i64 = whole.parse().ok()?;
    let fraction: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().ok()? * 10,
        _ => fraction.parse().ok()?,
    };
    whole.checked_mul(100)?.checked_add(fraction)
}

fn parse_payment_method(raw: &str) -> Option<PaymentMethod> {
    let normalized = raw.trim().to_lowercase().replace([' ', '-'], "_");
    serde_json::from_value(serde_json::Value::String(normalized)).ok()
}

// ---------------------------------------------------------------------------
// Events and blog posts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventForm {
    pub title: String,
    /// RFC 3339, or `YYYY-MM-DDTHH:MM` / `YYYY-MM-DD HH:MM` taken as UTC.
    pub starts_at: String,
    pub location: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewEvent {
    pub title: String,
    pub slug: String,
    pub starts_at: DateTime<Utc>,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl Validate for EventForm {
    type Output = NewEvent;

    fn validate(&self) -> Validation<NewEvent> {
        let mut errors = FieldErrors::new();
        let title = required(&mut errors, "title", &self.title);
        length(&mut errors, "title", &title, 2, NAME_MAX);
        let slug = sluggable(&mut errors, "title", &title);
        let raw_start = required(&mut errors, "starts_at", &self.starts_at);
        let starts_at = parse_datetime_input(&raw_start);
        if starts_at.is_none() && !raw_start.is_empty() {
            errors.add("starts_at", "Enter a date and time");
        }
        match starts_at {
            Some(starts_at) => errors.finish(|| NewEvent {
                title,
                slug,
                starts_at,
                location: optional(self.location.as_deref()),
                description: optional(self.description.as_deref()),
            }),
            None => Validation::Invalid(errors),
        }
    }
}

/// Parse a datetime as posted by a form.
#[must_use]
pub fn parse_datetime_input(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlogPostForm {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub publish: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewBlogPost {
    pub title: String,
    pub slug: String,
    pub body: String,
    pub publish: bool,
}

impl Validate for BlogPostForm {
    type Output = NewBlogPost;

    fn validate(&self) -> Validation<NewBlogPost> {
        let mut errors = FieldErrors::new();
        let title = required(&mut errors, "title", &self.title);
        length(&mut errors, "title", &title, 2, NAME_MAX);
        let slug = sluggable(&mut errors, "title", &title);
        let body = required(&mut errors, "body", &self.body);
        length(&mut errors, "body", &body, 20, 50_000);
        errors.finish(|| NewBlogPost {
            title,
            slug,
            body,
            publish: self.publish,
        })
    }
}
