//! In-process session store for tests and single-node runs.
//!
//! The CLI persists sessions through `chamber-db`; this store is for
//! embedders that keep sessions in process, such as a single-node web front.

use std::collections::HashMap;

use chamber_core::entities::SessionRecord;
use chamber_core::identity::{SessionStore, SessionToken};
use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::AuthError;
use crate::token::generate_token;

/// Sessions keyed by token digest. Expired entries are dropped lazily on read
/// and in bulk by [`MemorySessionStore::purge_expired`].
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, SessionRecord>>,
    ttl: Duration,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Number of stored sessions, expired ones included.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Drop every expired session and return how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, record| !record.is_expired(now));
        before - sessions.len()
    }
}

impl SessionStore for MemorySessionStore {
    type Error = AuthError;

    async fn create(&self, user_id: &str) -> Result<SessionToken, AuthError> {
        let token = generate_token()?;
        let now = Utc::now();
        let record = SessionRecord {
            token_hash: token.digest(),
            user_id: user_id.to_string(),
            created_at: now,
            expires_at: now + self.ttl,
        };
        self.sessions
            .write()
            .await
            .insert(record.token_hash.clone(), record);
        debug!(user_id, "session created");
        Ok(token)
    }

    async fn get(&self, token: &SessionToken) -> Result<Option<String>, AuthError> {
        let digest = token.digest();
        let now = Utc::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(&digest) {
                None => return Ok(None),
                Some(record) if !record.is_expired(now) => return Ok(Some(record.user_id.clone())),
                Some(_) => {}
            }
        }
        self.sessions.write().await.remove(&digest);
        Ok(None)
    }

    async fn revoke(&self, token: &SessionToken) -> Result<(), AuthError> {
        self.sessions.write().await.remove(&token.digest());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn create_get_revoke() {
        let store = MemorySessionStore::new(Duration::hours(1));
        let token = store.create("usr-1").await.unwrap();
        assert_eq!(store.get(&token).await.unwrap(), Some("usr-1".to_string()));

        store.revoke(&token).await.unwrap();
        assert_eq!(store.get(&token).await.unwrap(), None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn expired_session_is_dropped_on_read() {
        let store = MemorySessionStore::new(Duration::seconds(-1));
        let token = store.create("usr-1").await.unwrap();
        assert_eq!(store.len().await, 1);
        assert_eq!(store.get(&token).await.unwrap(), None);
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn purge_removes_only_expired() {
        let live = MemorySessionStore::new(Duration::hours(1));
        live.create("usr-1").await.unwrap();
        assert_eq!(live.purge_expired().await, 0);

        let dead = MemorySessionStore::new(Duration::seconds(-1));
        dead.create("usr-1").await.unwrap();
        dead.create("usr-2").await.unwrap();
        assert_eq!(dead.purge_expired().await, 2);
    }

    #[tokio::test]
    async fn unknown_token_is_none_and_revoke_is_noop() {
        let store = MemorySessionStore::new(Duration::hours(1));
        let stranger = SessionToken::new("not-a-session");
        assert_eq!(store.get(&stranger).await.unwrap(), None);
        store.revoke(&stranger).await.unwrap();
    }
}
