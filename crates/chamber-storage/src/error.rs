use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object storage is not configured (set storage.bucket and keys)")]
    NotConfigured,

    #[error("file is {size} bytes, the limit is {max}")]
    TooLarge { size: u64, max: u64 },

    #[error("empty upload")]
    Empty,

    #[error("unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("invalid upload path: {0}")]
    InvalidPath(String),

    #[error("object store error: {0}")]
    ObjectStore(#[from] object_store::Error),

    #[error("{0}")]
    Other(String),
}
