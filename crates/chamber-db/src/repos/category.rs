//! Business category repository, plus the category tree the directory reads.

use std::collections::HashMap;

use chrono::Utc;
use tracing::debug;

use chamber_core::directory::CategoryTree;
use chamber_core::entities::{BusinessCategory, BusinessType, CategoryWithTypes};
use chamber_core::forms::NewCategory;
use chamber_core::ids::PREFIX_CATEGORY;

use crate::error::{DatabaseError, is_unique_violation};
use crate::helpers::parse_datetime;
use crate::repos::business_type::row_to_business_type;
use crate::service::ChamberService;

fn row_to_category(row: &libsql::Row) -> Result<BusinessCategory, DatabaseError> {
    Ok(BusinessCategory {
        id: row.get::<String>(0)?,
        name: row.get::<String>(1)?,
        slug: row.get::<String>(2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

impl ChamberService {
    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Conflict` if the slug is already used.
    pub async fn create_category(&self, new: &NewCategory) -> Result<BusinessCategory, DatabaseError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_CATEGORY).await?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO business_categories (id, name, slug, created_at) VALUES (?1, ?2, ?3, ?4)",
                libsql::params![id.as_str(), new.name.as_str(), new.slug.as_str(), now.to_rfc3339()],
            )
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DatabaseError::conflict("category", new.slug.as_str())
                } else {
                    e.into()
                }
            })?;
        debug!(slug = %new.slug, "category created");

        Ok(BusinessCategory {
            id,
            name: new.name.clone(),
            slug: new.slug.clone(),
            created_at: now,
        })
    }

    /// Every category with its types nested, both ordered by name.
    pub async fn list_categories(&self) -> Result<Vec<CategoryWithTypes>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, name, slug, created_at FROM business_categories ORDER BY name",
                (),
            )
            .await?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next().await? {
            categories.push(row_to_category(&row)?);
        }

        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, category_id, name, slug, created_at FROM business_types ORDER BY name",
                (),
            )
            .await?;
        let mut types_by_category: HashMap<String, Vec<BusinessType>> = HashMap::new();
        while let Some(row) = rows.next().await? {
            let business_type = row_to_business_type(&row)?;
            types_by_category
                .entry(business_type.category_id.clone())
                .or_default()
                .push(business_type);
        }

        Ok(categories
            .into_iter()
            .map(|category| CategoryWithTypes {
                types: types_by_category.remove(&category.id).unwrap_or_default(),
                category,
            })
            .collect())
    }

    /// Categories and types in the shape the directory page consumes.
    pub async fn category_tree(&self) -> Result<CategoryTree, DatabaseError> {
        Ok(CategoryTree::new(self.list_categories().await?))
    }

    /// One category with its types.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown slug.
    pub async fn get_category_by_slug(&self, slug: &str) -> Result<CategoryWithTypes, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, name, slug, created_at FROM business_categories WHERE slug = ?1",
                [slug],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("category", slug))?;
        let category = row_to_category(&row)?;
        let types = self.list_business_types(&category.id).await?;
        Ok(CategoryWithTypes { category, types })
    }

    /// Delete a category and its types.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown slug and
    /// `DatabaseError::InvalidState` while businesses still use one of its types.
    pub async fn delete_category(&self, slug: &str) -> Result<(), DatabaseError> {
        let category = self.get_category_by_slug(slug).await?;

        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT COUNT(*) FROM businesses b
                 JOIN business_types t ON t.id = b.type_id
                 WHERE t.category_id = ?1",
                [category.category.id.as_str()],
            )
            .await?;
        let in_use = rows
            .next()
            .await?
            .ok_or(DatabaseError::NoResult)?
            .get::<i64>(0)?;
        if in_use > 0 {
            return Err(DatabaseError::InvalidState(format!(
                "category '{slug}' still has {in_use} businesses"
            )));
        }

        self.db()
            .conn()
            .execute(
                "DELETE FROM business_categories WHERE id = ?1",
                [category.category.id.as_str()],
            )
            .await?;
        debug!(slug, "category deleted");
        Ok(())
    }
}
