//! Schema migrations, embedded at compile time and applied on every open.
//!
//! Statements are written with `IF NOT EXISTS`, so reapplying is a no-op.

use tracing::debug;

use crate::ChamberDb;
use crate::error::DatabaseError;

/// `(name, sql)` in application order.
const MIGRATIONS: &[(&str, &str)] = &[(
    "001_initial",
    include_str!("../migrations/001_initial.sql"),
)];

impl ChamberDb {
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        for &(name, sql) in MIGRATIONS {
            self.conn
                .execute_batch(sql)
                .await
                .map_err(|e| DatabaseError::Migration(format!("{name}: {e}")))?;
            debug!(migration = name, "schema migration applied");
        }
        Ok(())
    }
}
