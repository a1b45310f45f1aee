//! The upload collaborator: bytes in, public URL (or an error message) out.

use std::sync::Arc;

use chamber_config::StorageConfig;
use object_store::aws::AmazonS3Builder;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StorageError;
use crate::key::{content_type_for, object_key};

/// One file posted by a form.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Logical folder, e.g. `logos` or `gallery/biz-1`.
    pub folder: String,
    /// Name as sent by the browser. Only the extension and a cleaned stem survive.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Wire shape returned to the browser: `{"url": ...}` or `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UploadResponse {
    Url { url: String },
    Error { error: String },
}

impl UploadResponse {
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Url { url } => Some(url),
            Self::Error { .. } => None,
        }
    }
}

pub struct UploadStore {
    store: Arc<dyn ObjectStore>,
    public_base: String,
    max_bytes: u64,
}

impl UploadStore {
    /// S3 (or S3-compatible) store from configuration.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotConfigured` without bucket and keys, or the
    /// builder's error.
    pub fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        if !config.is_configured() {
            return Err(StorageError::NotConfigured);
        }
        let mut builder = AmazonS3Builder::new()
            .with_bucket_name(&config.bucket)
            .with_region(&config.region)
            .with_access_key_id(&config.access_key_id)
            .with_secret_access_key(&config.secret_access_key);
        if !config.endpoint.is_empty() {
            builder = builder
                .with_endpoint(&config.endpoint)
                .with_allow_http(config.endpoint.starts_with("http://"));
        }
        let store = builder.build()?;
        Ok(Self {
            store: Arc::new(store),
            public_base: config.public_url(""),
            max_bytes: config.max_upload_bytes,
        })
    }

    /// Memory-backed store for tests and dry runs.
    #[must_use]
    pub fn in_memory(public_base: &str, max_bytes: u64) -> Self {
        Self {
            store: Arc::new(InMemory::new()),
            public_base: format!("{}/", public_base.trim_end_matches('/')),
            max_bytes,
        }
    }

    /// Store the file and return its public URL.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for empty or oversized files, unsupported types,
    /// bad folders, or a failed write.
    pub async fn upload(&self, request: &UploadRequest) -> Result<String, StorageError> {
        let size = request.bytes.len() as u64;
        if size == 0 {
            return Err(StorageError::Empty);
        }
        if size > self.max_bytes {
            return Err(StorageError::TooLarge {
                size,
                max: self.max_bytes,
            });
        }

        let key = object_key(&request.folder, &request.file_name)?;
        let extension = key.rsplit('.').next().unwrap_or_default();
        let mut attributes = Attributes::new();
        if let Some(content_type) = content_type_for(extension) {
            attributes.insert(Attribute::ContentType, content_type.into());
        }

        self.store
            .put_opts(
                &Path::from(key.as_str()),
                PutPayload::from(request.bytes.clone()),
                PutOptions {
                    attributes,
                    ..Default::default()
                },
            )
            .await?;
        debug!(key = %key, size, "upload stored");
        Ok(self.url_for(&key))
    }

    /// [`Self::upload`] folded into the browser response shape.
    pub async fn handle(&self, request: &UploadRequest) -> UploadResponse {
        match self.upload(request).await {
            Ok(url) => UploadResponse::Url { url },
            Err(e) => {
                warn!(error = %e, file = %request.file_name, "upload rejected");
                UploadResponse::Error {
                    error: e.to_string(),
                }
            }
        }
    }

    /// Remove a previously uploaded object by its public URL or key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidPath` for URLs outside this store.
    pub async fn delete(&self, url_or_key: &str) -> Result<(), StorageError> {
        let key = self.key_for(url_or_key)?;
        self.store.delete(&Path::from(key)).await?;
        Ok(())
    }

    /// Whether an object exists.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for foreign URLs or store failures other than
    /// not-found.
    pub async fn exists(&self, url_or_key: &str) -> Result<bool, StorageError> {
        let key = self.key_for(url_or_key)?;
        match self.store.head(&Path::from(key)).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}{key}", self.public_base)
    }

    fn key_for<'a>(&self, url_or_key: &'a str) -> Result<&'a str, StorageError> {
        if url_or_key.contains("://") {
            url_or_key
                .strip_prefix(self.public_base.as_str())
                .ok_or_else(|| StorageError::InvalidPath(url_or_key.to_string()))
        } else {
            Ok(url_or_key)
        }
    }
}
