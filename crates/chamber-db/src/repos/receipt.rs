//! Membership receipts.
//!
//! Numbers are `{year}-{seq:04}`, with `seq` restarting at 1 each calendar
//! year (UTC).

use chrono::{Datelike, Utc};
use tracing::info;

use chamber_core::entities::Receipt;
use chamber_core::forms::NewReceipt;
use chamber_core::ids::PREFIX_RECEIPT;

use crate::error::{DatabaseError, is_unique_violation};
use crate::helpers::{parse_datetime, parse_enum};
use crate::service::ChamberService;

const RECEIPT_COLUMNS: &str = "id, number, business_id, amount_cents, payment_method, description, issued_at";

fn row_to_receipt(row: &libsql::Row) -> Result<Receipt, DatabaseError> {
    Ok(Receipt {
        id: row.get::<String>(0)?,
        number: row.get::<String>(1)?,
        business_id: row.get::<String>(2)?,
        amount_cents: row.get::<i64>(3)?,
        payment_method: parse_enum(&row.get::<String>(4)?)?,
        description: row.get::<String>(5)?,
        issued_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

/// Format a receipt number.
#[must_use]
pub fn receipt_number(year: i32, seq: i64) -> String {
    format!("{year}-{seq:04}")
}

impl ChamberService {
    /// Issue the next receipt for the current year.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown business and
    /// `DatabaseError::Conflict` if a concurrent issue took the same number.
    pub async fn issue_receipt(&self, new: &NewReceipt) -> Result<Receipt, DatabaseError> {
        self.get_business(&new.business_id).await?;

        let now = Utc::now();
        let year = now.year();
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT MAX(CAST(substr(number, 6) AS INTEGER)) FROM receipts WHERE number LIKE ?1",
                [format!("{year}-%")],
            )
            .await?;
        let last = rows
            .next()
            .await?
            .ok_or(DatabaseError::NoResult)?
            .get::<Option<i64>>(0)?
            .unwrap_or(0);
        let number = receipt_number(year, last + 1);

        let id = self.db().generate_id(PREFIX_RECEIPT).await?;
        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO receipts ({RECEIPT_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
                libsql::params![
                    id.as_str(),
                    number.as_str(),
                    new.business_id.as_str(),
                    new.amount_cents,
                    new.payment_method.as_str(),
                    new.description.as_str(),
                    now.to_rfc3339()
                ],
            )
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DatabaseError::conflict("receipt", number.as_str())
                } else {
                    e.into()
                }
            })?;
        info!(number = %number, business_id = %new.business_id, "receipt issued");

        Ok(Receipt {
            id,
            number,
            business_id: new.business_id.clone(),
            amount_cents: new.amount_cents,
            payment_method: new.payment_method,
            description: new.description.clone(),
            issued_at: now,
        })
    }

    /// Look up by id or by receipt number.
    pub async fn get_receipt(&self, id_or_number: &str) -> Result<Receipt, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {RECEIPT_COLUMNS} FROM receipts WHERE id = ?1 OR number = ?1"),
                [id_or_number],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("receipt", id_or_number))?;
        row_to_receipt(&row)
    }

    /// Receipts ordered by number, optionally for one business.
    pub async fn list_receipts(&self, business_id: Option<&str>) -> Result<Vec<Receipt>, DatabaseError> {
        let mut rows = match business_id {
            Some(business_id) => {
                self.db()
                    .conn()
                    .query(
                        &format!("SELECT {RECEIPT_COLUMNS} FROM receipts WHERE business_id = ?1 ORDER BY number"),
                        [business_id],
                    )
                    .await?
            }
            None => {
                self.db()
                    .conn()
                    .query(&format!("SELECT {RECEIPT_COLUMNS} FROM receipts ORDER BY number"), ())
                    .await?
            }
        };
        let mut receipts = Vec::new();
        while let Some(row) = rows.next().await? {
            receipts.push(row_to_receipt(&row)?);
        }
        Ok(receipts)
    }
}
