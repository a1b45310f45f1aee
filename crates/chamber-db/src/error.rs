//! Database error types for chamber-db.

use chamber_core::errors::CoreError;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Lookup by a natural key (slug, email, id) found nothing.
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// A unique key (slug, email, receipt number) is already taken.
    #[error("{entity} already exists: {key}")]
    Conflict { entity: &'static str, key: String },

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    pub(crate) fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            key: key.into(),
        }
    }

    pub(crate) fn conflict(entity: &'static str, key: impl Into<String>) -> Self {
        Self::Conflict {
            entity,
            key: key.into(),
        }
    }
}

/// True for SQLite `UNIQUE` / `PRIMARY KEY` constraint failures.
pub(crate) fn is_unique_violation(err: &libsql::Error) -> bool {
    let msg = err.to_string();
    msg.contains("UNIQUE constraint failed")
}

impl From<DatabaseError> for CoreError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound { entity, key } => Self::not_found(entity, key),
            DatabaseError::NoResult => Self::not_found("row", "?"),
            DatabaseError::Conflict { entity, key } => Self::Conflict {
                entity_type: entity.to_string(),
                key,
            },
            DatabaseError::InvalidState(msg) => Self::Validation(msg),
            other => Self::Other(anyhow::Error::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_to_core_status() {
        let not_found: CoreError = DatabaseError::not_found("category", "retail").into();
        assert_eq!(not_found.status(), 404);

        let conflict: CoreError = DatabaseError::conflict("category", "retail").into();
        assert_eq!(conflict.status(), 409);

        let other: CoreError = DatabaseError::Query("boom".into()).into();
        assert_eq!(other.status(), 500);
    }
}
