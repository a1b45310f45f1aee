//! Enquiry repository: messages from signed-in members to a business.

use chrono::Utc;
use tracing::debug;

use chamber_core::entities::Enquiry;
use chamber_core::enums::EnquiryStatus;
use chamber_core::forms::NewEnquiry;
use chamber_core::ids::PREFIX_ENQUIRY;

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, parse_enum};
use crate::service::ChamberService;

const ENQUIRY_COLUMNS: &str = "id, business_id, sender_id, name, email, message, status, created_at";

fn row_to_enquiry(row: &libsql::Row) -> Result<Enquiry, DatabaseError> {
    Ok(Enquiry {
        id: row.get::<String>(0)?,
        business_id: row.get::<String>(1)?,
        sender_id: row.get::<String>(2)?,
        name: row.get::<String>(3)?,
        email: row.get::<String>(4)?,
        message: row.get::<String>(5)?,
        status: parse_enum(&row.get::<String>(6)?)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

impl ChamberService {
    /// Record an enquiry from `sender_id`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown business or sender.
    pub async fn create_enquiry(&self, sender_id: &str, new: &NewEnquiry) -> Result<Enquiry, DatabaseError> {
        self.get_business(&new.business_id).await?;
        self.get_user(sender_id).await?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_ENQUIRY).await?;
        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO enquiries ({ENQUIRY_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"),
                libsql::params![
                    id.as_str(),
                    new.business_id.as_str(),
                    sender_id,
                    new.name.as_str(),
                    new.email.as_str(),
                    new.message.as_str(),
                    EnquiryStatus::Open.as_str(),
                    now.to_rfc3339()
                ],
            )
            .await?;
        debug!(enquiry_id = %id, business_id = %new.business_id, "enquiry created");

        Ok(Enquiry {
            id,
            business_id: new.business_id.clone(),
            sender_id: sender_id.to_string(),
            name: new.name.clone(),
            email: new.email.clone(),
            message: new.message.clone(),
            status: EnquiryStatus::Open,
            created_at: now,
        })
    }

    pub async fn get_enquiry(&self, id: &str) -> Result<Enquiry, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {ENQUIRY_COLUMNS} FROM enquiries WHERE id = ?1"), [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("enquiry", id))?;
        row_to_enquiry(&row)
    }

    /// Enquiries for one business, newest first.
    pub async fn list_enquiries(&self, business_id: &str) -> Result<Vec<Enquiry>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {ENQUIRY_COLUMNS} FROM enquiries WHERE business_id = ?1 ORDER BY created_at DESC"
                ),
                [business_id],
            )
            .await?;
        let mut enquiries = Vec::new();
        while let Some(row) = rows.next().await? {
            enquiries.push(row_to_enquiry(&row)?);
        }
        Ok(enquiries)
    }

    /// Move an enquiry along `open -> answered -> closed`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` if the transition is not allowed.
    pub async fn set_enquiry_status(
        &self,
        id: &str,
        status: EnquiryStatus,
    ) -> Result<Enquiry, DatabaseError> {
        let current = self.get_enquiry(id).await?;
        if !current.status.can_transition_to(status) {
            return Err(DatabaseError::InvalidState(format!(
                "Cannot transition enquiry {id} from {} to {status}",
                current.status
            )));
        }
        self.db()
            .conn()
            .execute(
                "UPDATE enquiries SET status = ?1 WHERE id = ?2",
                [status.as_str(), id],
            )
            .await?;
        Ok(Enquiry { status, ..current })
    }
}

#[cfg(test)]
mod tests {
    use chamber_core::enums::UserRole;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::{seed_business, seed_category, seed_type, seed_user, test_service};

    async fn setup() -> (ChamberService, String, String) {
        let svc = test_service().await;
        seed_category(&svc, "Retail").await;
        let grocery = seed_type(&svc, "retail", "Grocery").await;
        let owner = seed_user(&svc, "Owner", UserRole::Member).await;
        let member = seed_user(&svc, "Member", UserRole::Member).await;
        let business = seed_business(&svc, &owner, "Acme Mart", &grocery.id).await;
        (svc, business.id, member.id)
    }

    fn enquiry_for(business_id: &str) -> NewEnquiry {
        NewEnquiry {
            business_id: business_id.to_string(),
            name: "Member".into(),
            email: "member@chamber.test".into(),
            message: "Do you deliver on weekends?".into(),
        }
    }

    #[tokio::test]
    async fn create_and_list() {
        let (svc, business_id, member_id) = setup().await;
        let enquiry = svc.create_enquiry(&member_id, &enquiry_for(&business_id)).await.unwrap();
        assert_eq!(enquiry.status, EnquiryStatus::Open);

        let listed = svc.list_enquiries(&business_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, enquiry.id);
    }

    #[tokio::test]
    async fn status_follows_transitions() {
        let (svc, business_id, member_id) = setup().await;
        let enquiry = svc.create_enquiry(&member_id, &enquiry_for(&business_id)).await.unwrap();

        let answered = svc.set_enquiry_status(&enquiry.id, EnquiryStatus::Answered).await.unwrap();
        assert_eq!(answered.status, EnquiryStatus::Answered);

        let err = svc.set_enquiry_status(&enquiry.id, EnquiryStatus::Open).await.unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidState(_)));

        svc.set_enquiry_status(&enquiry.id, EnquiryStatus::Closed).await.unwrap();
        assert_eq!(svc.get_enquiry(&enquiry.id).await.unwrap().status, EnquiryStatus::Closed);
    }

    #[tokio::test]
    async fn unknown_business_is_not_found() {
        let (svc, _, member_id) = setup().await;
        let err = svc.create_enquiry(&member_id, &enquiry_for("biz-missing")).await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { entity: "business", .. }));
    }
}
