use chamber_auth::AuthError;
use chamber_core::errors::CoreError;
use chamber_db::error::DatabaseError;
use chamber_storage::StorageError;

/// HTTP-style status for a failed command, from the first typed cause.
#[must_use]
pub fn status_of(error: &anyhow::Error) -> u16 {
    for cause in error.chain() {
        if let Some(error) = cause.downcast_ref::<CoreError>() {
            return error.status();
        }
        if let Some(error) = cause.downcast_ref::<AuthError>() {
            return error.status();
        }
        if let Some(error) = cause.downcast_ref::<DatabaseError>() {
            return match error {
                DatabaseError::NotFound { .. } | DatabaseError::NoResult => 404,
                DatabaseError::Conflict { .. } => 409,
                DatabaseError::InvalidState(_) => 422,
                _ => 500,
            };
        }
        if let Some(error) = cause.downcast_ref::<StorageError>() {
            return match error {
                StorageError::TooLarge { .. } => 413,
                StorageError::Empty | StorageError::UnsupportedType(_) | StorageError::InvalidPath(_) => 400,
                _ => 500,
            };
        }
    }
    500
}

/// Exit code: 2 for caller mistakes (4xx), 1 for everything else.
#[must_use]
pub fn exit_code(status: u16) -> i32 {
    if (400..500).contains(&status) { 2 } else { 1 }
}
