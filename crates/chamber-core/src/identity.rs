//! Signed-in identity and the session store seam.
//!
//! Handlers never read cookies themselves: the token is extracted at the
//! edge, resolved through a [`SessionStore`], and the resulting identity is
//! passed in explicitly.

use std::future::Future;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::enums::UserRole;

/// Lightweight authenticated user identity for cross-crate passing.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuthIdentity {
    pub user_id: String,
    pub email: String,
    pub role: UserRole,
}

/// Opaque bearer token identifying a login session.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// SHA-256 of the token, hex encoded. This is what stores persist.
    #[must_use]
    pub fn digest(&self) -> String {
        sha256_hex(self.0.as_bytes())
    }
}

// Tokens are credentials; keep them out of logs.
impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

/// Lowercase hex SHA-256 of `bytes`.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Storage for login sessions.
///
/// Implemented by the libSQL service (`chamber-db`) and by the in-memory store
/// in `chamber-auth`.
pub trait SessionStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Start a session for `user_id` and return its fresh token.
    fn create(&self, user_id: &str) -> impl Future<Output = Result<SessionToken, Self::Error>>;

    /// Resolve a token to its user id. Unknown or expired tokens yield `None`.
    fn get(&self, token: &SessionToken) -> impl Future<Output = Result<Option<String>, Self::Error>>;

    /// End a session. Revoking an unknown token is not an error.
    fn revoke(&self, token: &SessionToken) -> impl Future<Output = Result<(), Self::Error>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_stable_hex() {
        let token = SessionToken::new("abc");
        assert_eq!(
            token.digest(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn debug_redacts_token() {
        let token = SessionToken::new("secret-value");
        assert_eq!(format!("{token:?}"), "SessionToken(..)");
    }

    #[test]
    fn token_serializes_as_plain_string() {
        let token = SessionToken::new("t0k");
        assert_eq!(serde_json::to_string(&token).unwrap(), "\"t0k\"");
    }
}
