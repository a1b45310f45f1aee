//! Login session repository.
//!
//! Tokens are minted by libSQL (`randomblob`) and handed to the caller once.
//! Only their SHA-256 digest is stored.

use chrono::Utc;
use tracing::debug;

use chamber_core::entities::{SessionRecord, User};
use chamber_core::identity::{AuthIdentity, SessionStore, SessionToken};

use crate::error::DatabaseError;
use crate::helpers::parse_datetime;
use crate::service::ChamberService;

fn row_to_session(row: &libsql::Row) -> Result<SessionRecord, DatabaseError> {
    Ok(SessionRecord {
        token_hash: row.get::<String>(0)?,
        user_id: row.get::<String>(1)?,
        created_at: parse_datetime(&row.get::<String>(2)?)?,
        expires_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

impl ChamberService {
    /// Start a session for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the user does not exist.
    pub async fn start_session(&self, user_id: &str) -> Result<SessionToken, DatabaseError> {
        // Surface a typed error instead of a foreign key failure.
        self.get_user(user_id).await?;

        let now = Utc::now();
        let token = SessionToken::new(self.db().generate_token().await?);
        self.db()
            .conn()
            .execute(
                "INSERT INTO sessions (token_hash, user_id, created_at, expires_at)
                 VALUES (?1, ?2, ?3, ?4)",
                libsql::params![
                    token.digest(),
                    user_id,
                    now.to_rfc3339(),
                    (now + self.session_ttl()).to_rfc3339()
                ],
            )
            .await?;
        debug!(user_id, "session started");
        Ok(token)
    }

    /// The stored record for a token, expired or not.
    pub async fn get_session_record(
        &self,
        token: &SessionToken,
    ) -> Result<Option<SessionRecord>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT token_hash, user_id, created_at, expires_at FROM sessions WHERE token_hash = ?1",
                [token.digest()],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_session(&row)?)),
            None => Ok(None),
        }
    }

    /// Resolve a token to its live session's user id.
    pub async fn session_user_id(&self, token: &SessionToken) -> Result<Option<String>, DatabaseError> {
        let record = self.get_session_record(token).await?;
        Ok(record
            .filter(|r| !r.is_expired(Utc::now()))
            .map(|r| r.user_id))
    }

    /// Resolve a token to the signed-in identity.
    pub async fn resolve_identity(
        &self,
        token: &SessionToken,
    ) -> Result<Option<AuthIdentity>, DatabaseError> {
        let Some(user_id) = self.session_user_id(token).await? else {
            return Ok(None);
        };
        let User { id, email, role, .. } = self.get_user(&user_id).await?;
        Ok(Some(AuthIdentity {
            user_id: id,
            email,
            role,
        }))
    }

    pub async fn end_session(&self, token: &SessionToken) -> Result<(), DatabaseError> {
        self.db()
            .conn()
            .execute("DELETE FROM sessions WHERE token_hash = ?1", [token.digest()])
            .await?;
        Ok(())
    }

    /// Delete expired sessions. Returns how many were removed.
    pub async fn purge_expired_sessions(&self) -> Result<u64, DatabaseError> {
        let removed = self
            .db()
            .conn()
            .execute(
                "DELETE FROM sessions WHERE expires_at <= ?1",
                [Utc::now().to_rfc3339()],
            )
            .await?;
        debug!(removed, "purged expired sessions");
        Ok(removed)
    }
}

impl SessionStore for ChamberService {
    type Error = DatabaseError;

    async fn create(&self, user_id: &str) -> Result<SessionToken, DatabaseError> {
        self.start_session(user_id).await
    }

    async fn get(&self, token: &SessionToken) -> Result<Option<String>, DatabaseError> {
        self.session_user_id(token).await
    }

    async fn revoke(&self, token: &SessionToken) -> Result<(), DatabaseError> {
        self.end_session(token).await
    }
}

#[cfg(test)]
mod tests {
    use chamber_core::enums::UserRole;
    use chrono::Duration;

    use super::*;
    use crate::test_support::{seed_user, test_service};

    #[tokio::test]
    async fn session_roundtrip_through_store_trait() {
        let svc = test_service().await;
        let user = seed_user(&svc, "Ada", UserRole::Member).await;

        let token = SessionStore::create(&svc, &user.id).await.unwrap();
        assert_eq!(SessionStore::get(&svc, &token).await.unwrap(), Some(user.id.clone()));

        SessionStore::revoke(&svc, &token).await.unwrap();
        assert_eq!(SessionStore::get(&svc, &token).await.unwrap(), None);
    }

    #[tokio::test]
    async fn stores_digest_not_token() {
        let svc = test_service().await;
        let user = seed_user(&svc, "Ada", UserRole::Member).await;
        let token = svc.start_session(&user.id).await.unwrap();

        let record = svc.get_session_record(&token).await.unwrap().unwrap();
        assert_eq!(record.token_hash, token.digest());
        assert_ne!(record.token_hash, token.as_str());
    }

    #[tokio::test]
    async fn expired_session_resolves_to_none() {
        let svc = test_service().await.with_session_ttl(Duration::seconds(-1));
        let user = seed_user(&svc, "Ada", UserRole::Member).await;
        let token = svc.start_session(&user.id).await.unwrap();

        assert_eq!(svc.session_user_id(&token).await.unwrap(), None);
        assert_eq!(svc.purge_expired_sessions().await.unwrap(), 1);
        assert!(svc.get_session_record(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn resolve_identity_carries_role() {
        let svc = test_service().await;
        let user = seed_user(&svc, "Ada", UserRole::Admin).await;
        let token = svc.start_session(&user.id).await.unwrap();

        let identity = svc.resolve_identity(&token).await.unwrap().unwrap();
        assert_eq!(identity.user_id, user.id);
        assert!(identity.role.is_admin());
    }

    #[tokio::test]
    async fn unknown_user_cannot_start_session() {
        let svc = test_service().await;
        let err = svc.start_session("usr-missing").await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { entity: "user", .. }));
    }

    #[tokio::test]
    async fn revoking_unknown_token_is_ok() {
        let svc = test_service().await;
        svc.end_session(&SessionToken::new("nope")).await.unwrap();
    }
}
