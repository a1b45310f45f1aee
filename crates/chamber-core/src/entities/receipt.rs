use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::PaymentMethod;

/// A membership payment receipt issued by the back office.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Receipt {
    pub id: String,
    /// Human-facing number, `{year}-{sequence:04}`.
    pub number: String,
    pub business_id: String,
    pub amount_cents: i64,
    pub payment_method: PaymentMethod,
    pub description: String,
    pub issued_at: DateTime<Utc>,
}

impl Receipt {
    /// Amount formatted with two decimals, e.g. `120.50`.
    #[must_use]
    pub fn amount_display(&self) -> String {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let cents = self.amount_cents.unsigned_abs();
        format!("{sign}{}.{:02}", cents / 100, cents % 100)
    }
}
