//! # chamber-storage
//!
//! Upload proxy for business logos, service images, and gallery photos.
//!
//! Files are validated (size, image type), given a collision-free key under
//! a cleaned folder, written through `object_store` (S3 in production,
//! `InMemory` in tests), and answered with `{"url": ...}` or `{"error": ...}`.

pub mod error;
pub mod key;
pub mod upload;

pub use error::StorageError;
pub use upload::{UploadRequest, UploadResponse, UploadStore};
