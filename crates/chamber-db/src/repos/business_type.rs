//! Business type repository. Types always belong to one category.

use chrono::Utc;
use tracing::debug;

use chamber_core::entities::BusinessType;
use chamber_core::forms::NewBusinessType;
use chamber_core::ids::PREFIX_TYPE;

use crate::error::{DatabaseError, is_unique_violation};
use crate::helpers::parse_datetime;
use crate::service::ChamberService;

pub(crate) fn row_to_business_type(row: &libsql::Row) -> Result<BusinessType, DatabaseError> {
    Ok(BusinessType {
        id: row.get::<String>(0)?,
        category_id: row.get::<String>(1)?,
        name: row.get::<String>(2)?,
        slug: row.get::<String>(3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl ChamberService {
    /// Create a type under the category named by `new.category_slug`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown category and
    /// `DatabaseError::Conflict` if the category already has this slug.
    pub async fn create_business_type(
        &self,
        new: &NewBusinessType,
    ) -> Result<BusinessType, DatabaseError> {
        let category = self.get_category_by_slug(&new.category_slug).await?.category;
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_TYPE).await?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO business_types (id, category_id, name, slug, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![
                    id.as_str(),
                    category.id.as_str(),
                    new.name.as_str(),
                    new.slug.as_str(),
                    now.to_rfc3339()
                ],
            )
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DatabaseError::conflict("type", format!("{}/{}", category.slug, new.slug))
                } else {
                    e.into()
                }
            })?;
        debug!(category = %category.slug, slug = %new.slug, "business type created");

        Ok(BusinessType {
            id,
            category_id: category.id,
            name: new.name.clone(),
            slug: new.slug.clone(),
            created_at: now,
        })
    }

    pub async fn get_business_type_by_id(&self, id: &str) -> Result<BusinessType, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, category_id, name, slug, created_at FROM business_types WHERE id = ?1",
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("type", id))?;
        row_to_business_type(&row)
    }

    /// Look up a type by its route segments.
    pub async fn get_business_type(
        &self,
        category_slug: &str,
        type_slug: &str,
    ) -> Result<BusinessType, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT t.id, t.category_id, t.name, t.slug, t.created_at
                 FROM business_types t
                 JOIN business_categories c ON c.id = t.category_id
                 WHERE c.slug = ?1 AND t.slug = ?2",
                [category_slug, type_slug],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("type", format!("{category_slug}/{type_slug}")))?;
        row_to_business_type(&row)
    }

    pub async fn list_business_types(&self, category_id: &str) -> Result<Vec<BusinessType>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, category_id, name, slug, created_at FROM business_types
                 WHERE category_id = ?1 ORDER BY name",
                [category_id],
            )
            .await?;
        let mut types = Vec::new();
        while let Some(row) = rows.next().await? {
            types.push(row_to_business_type(&row)?);
        }
        Ok(types)
    }
}
