//! Cross-cutting error types for Chamber.
//!
//! Domain-specific errors (e.g., `DatabaseError`, `StorageError`) are defined in
//! their respective crates. A unified error is deferred to `chamber-cli` where
//! all crate errors converge.

use thiserror::Error;

use crate::validation::FieldErrors;

/// Errors that can be raised by any Chamber crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A route parameter was missing or malformed.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// An entity with the same unique key already exists.
    #[error("{entity_type} already exists: {key}")]
    Conflict { entity_type: String, key: String },

    /// Data failed validation (schema, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A submitted form failed field-level validation.
    #[error("Invalid form: {0}")]
    InvalidForm(FieldErrors),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Build a `NotFound` error.
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    /// HTTP status a calling route reports for this error.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::NotFound { .. } => 404,
            Self::Conflict { .. } => 409,
            Self::Validation(_) | Self::InvalidForm(_) => 422,
            Self::Other(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_route_conventions() {
        assert_eq!(CoreError::BadRequest("missing slug".into()).status(), 400);
        assert_eq!(CoreError::not_found("category", "retail").status(), 404);
        assert_eq!(
            CoreError::Conflict {
                entity_type: "category".into(),
                key: "retail".into()
            }
            .status(),
            409
        );
        assert_eq!(CoreError::Validation("bad".into()).status(), 422);
    }

    #[test]
    fn not_found_message_names_entity() {
        let err = CoreError::not_found("business type", "grocery");
        assert_eq!(err.to_string(), "Entity not found: business type grocery");
    }
}
