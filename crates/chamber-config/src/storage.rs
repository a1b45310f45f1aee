//! S3-compatible object storage for logos and gallery uploads.

use serde::{Deserialize, Serialize};

fn default_region() -> String {
    String::from("us-east-1")
}

/// 5 MiB.
const fn default_max_upload_bytes() -> u64 {
    5 * 1024 * 1024
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub bucket: String,

    #[serde(default = "default_region")]
    pub region: String,

    /// Custom endpoint for S3-compatible providers. Empty means AWS.
    #[serde(default)]
    pub endpoint: String,

    #[serde(default)]
    pub access_key_id: String,

    #[serde(default)]
    pub secret_access_key: String,

    /// Base URL that public object URLs are built from. If empty, derived from
    /// the endpoint and bucket.
    #[serde(default)]
    pub public_base_url: String,

    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            region: default_region(),
            endpoint: String::new(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            public_base_url: String::new(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl StorageConfig {
    /// Check if the storage config has the minimum required fields.
    pub fn is_configured(&self) -> bool {
        !self.bucket.is_empty()
            && !self.access_key_id.is_empty()
            && !self.secret_access_key.is_empty()
    }

    /// Public URL for an object key.
    pub fn public_url(&self, key: &str) -> String {
        let base = if !self.public_base_url.is_empty() {
            self.public_base_url.trim_end_matches('/').to_string()
        } else if !self.endpoint.is_empty() {
            format!("{}/{}", self.endpoint.trim_end_matches('/'), self.bucket)
        } else {
            format!("https://{}.s3.{}.amazonaws.com", self.bucket, self.region)
        };
        format!("{base}/{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> StorageConfig {
        StorageConfig {
            bucket: "chamber-media".into(),
            access_key_id: "key".into(),
            secret_access_key: "secret".into(),
            ..Default::default()
        }
    }

    #[test]
    fn default_is_not_configured() {
        assert!(!StorageConfig::default().is_configured());
        assert!(configured().is_configured());
    }

    #[test]
    fn public_url_prefers_explicit_base() {
        let config = StorageConfig {
            public_base_url: "https://cdn.chamber.example/".into(),
            endpoint: "http://localhost:9000".into(),
            ..configured()
        };
        assert_eq!(
            config.public_url("logos/acme.png"),
            "https://cdn.chamber.example/logos/acme.png"
        );
    }

    #[test]
    fn public_url_from_custom_endpoint() {
        let config = StorageConfig {
            endpoint: "http://localhost:9000".into(),
            ..configured()
        };
        assert_eq!(
            config.public_url("gallery/a.jpg"),
            "http://localhost:9000/chamber-media/gallery/a.jpg"
        );
    }

    #[test]
    fn public_url_defaults_to_aws() {
        assert_eq!(
            configured().public_url("logos/a.png"),
            "https://chamber-media.s3.us-east-1.amazonaws.com/logos/a.png"
        );
    }
}
