use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EnquiryStatus;

/// A message sent by a signed-in visitor to a business.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Enquiry {
    pub id: String,
    pub business_id: String,
    pub sender_id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub status: EnquiryStatus,
    pub created_at: DateTime<Utc>,
}
