use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A service offered by a business, shown on its profile.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BusinessService {
    pub id: String,
    pub business_id: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// An uploaded gallery image on a business profile.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GalleryImage {
    pub id: String,
    pub business_id: String,
    pub url: String,
    pub caption: Option<String>,
    pub created_at: DateTime<Utc>,
}
