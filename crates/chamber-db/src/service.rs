//! Service layer that hosts every repository method.
//!
//! `ChamberService` wraps `ChamberDb` plus the settings repositories need
//! (session lifetime). All repo methods are implemented as
//! `impl ChamberService` blocks under `repos/`.

use chamber_config::ChamberConfig;
use chrono::Duration;
use tracing::debug;

use crate::ChamberDb;
use crate::error::DatabaseError;

/// Sessions last thirty days unless configured otherwise.
const DEFAULT_SESSION_TTL_HOURS: i64 = 720;

pub struct ChamberService {
    db: ChamberDb,
    session_ttl: Duration,
}

impl ChamberService {
    /// Create a service over a local database file (or `":memory:"`).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = ChamberDb::open_local(db_path).await?;
        Ok(Self::from_db(db))
    }

    /// Open the database described by `config`: remote when a URL and token
    /// are configured, otherwise the local path.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn from_config(config: &ChamberConfig) -> Result<Self, DatabaseError> {
        let db = if config.database.is_remote() {
            debug!(url = %config.database.url, "opening remote database");
            ChamberDb::open_remote(&config.database.url, &config.database.auth_token).await?
        } else {
            debug!(path = %config.database.path, "opening local database");
            ChamberDb::open_local(&config.database.path).await?
        };
        Ok(Self::from_db(db).with_session_ttl(Duration::hours(i64::from(
            config.site.session_ttl_hours,
        ))))
    }

    /// Create from an existing `ChamberDb`.
    #[must_use]
    pub fn from_db(db: ChamberDb) -> Self {
        Self {
            db,
            session_ttl: Duration::hours(DEFAULT_SESSION_TTL_HOURS),
        }
    }

    #[must_use]
    pub const fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &ChamberDb {
        &self.db
    }

    #[must_use]
    pub const fn session_ttl(&self) -> Duration {
        self.session_ttl
    }
}
