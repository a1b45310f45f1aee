//! Business repository: profiles, verification, and directory listings.

use chrono::Utc;
use tracing::{debug, info};

use chamber_core::directory::BusinessListing;
use chamber_core::entities::Business;
use chamber_core::enums::UserRole;
use chamber_core::forms::BusinessProfile;
use chamber_core::ids::PREFIX_BUSINESS;

use crate::error::{DatabaseError, is_unique_violation};
use crate::helpers::{get_bool, get_opt_string, parse_datetime};
use crate::service::ChamberService;

const BUSINESS_COLUMNS: &str = "id, owner_id, type_id, name, slug, description, email, phone, \
     website, address, logo_url, verified, created_at, updated_at";

fn row_to_business(row: &libsql::Row) -> Result<Business, DatabaseError> {
    Ok(Business {
        id: row.get::<String>(0)?,
        owner_id: row.get::<String>(1)?,
        type_id: row.get::<String>(2)?,
        name: row.get::<String>(3)?,
        slug: row.get::<String>(4)?,
        description: get_opt_string(row, 5)?,
        email: get_opt_string(row, 6)?,
        phone: get_opt_string(row, 7)?,
        website: get_opt_string(row, 8)?,
        address: get_opt_string(row, 9)?,
        logo_url: get_opt_string(row, 10)?,
        verified: get_bool(row, 11)?,
        created_at: parse_datetime(&row.get::<String>(12)?)?,
        updated_at: parse_datetime(&row.get::<String>(13)?)?,
    })
}

fn slug_conflict(slug: &str) -> impl FnOnce(libsql::Error) -> DatabaseError + '_ {
    move |e| {
        if is_unique_violation(&e) {
            DatabaseError::conflict("business", slug)
        } else {
            e.into()
        }
    }
}

impl ChamberService {
    /// Register a business for `owner_id`. New businesses start unverified.
    ///
    /// A `member` owner is promoted to `business_owner`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown owner or type and
    /// `DatabaseError::Conflict` if the slug is taken.
    pub async fn create_business(
        &self,
        owner_id: &str,
        profile: &BusinessProfile,
    ) -> Result<Business, DatabaseError> {
        let owner = self.get_user(owner_id).await?;
        self.get_business_type_by_id(&profile.type_id).await?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_BUSINESS).await?;
        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO businesses ({BUSINESS_COLUMNS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, 0, ?12, ?12)"
                ),
                libsql::params![
                    id.as_str(),
                    owner_id,
                    profile.type_id.as_str(),
                    profile.name.as_str(),
                    profile.slug.as_str(),
                    profile.description.as_deref(),
                    profile.email.as_deref(),
                    profile.phone.as_deref(),
                    profile.website.as_deref(),
                    profile.address.as_deref(),
                    profile.logo_url.as_deref(),
                    now.to_rfc3339()
                ],
            )
            .await
            .map_err(slug_conflict(&profile.slug))?;

        if owner.role == UserRole::Member {
            self.set_user_role(owner_id, UserRole::BusinessOwner).await?;
        }
        debug!(business_id = %id, slug = %profile.slug, "business created");

        Ok(Business {
            id,
            owner_id: owner_id.to_string(),
            type_id: profile.type_id.clone(),
            name: profile.name.clone(),
            slug: profile.slug.clone(),
            description: profile.description.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            website: profile.website.clone(),
            address: profile.address.clone(),
            logo_url: profile.logo_url.clone(),
            verified: false,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_business(&self, id: &str) -> Result<Business, DatabaseError> {
        self.fetch_business("id", id).await
    }

    pub async fn get_business_by_slug(&self, slug: &str) -> Result<Business, DatabaseError> {
        self.fetch_business("slug", slug).await
    }

    async fn fetch_business(&self, column: &str, key: &str) -> Result<Business, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {BUSINESS_COLUMNS} FROM businesses WHERE {column} = ?1"),
                [key],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("business", key))?;
        row_to_business(&row)
    }

    /// Businesses ordered by name.
    pub async fn list_businesses(&self, verified_only: bool) -> Result<Vec<Business>, DatabaseError> {
        let filter = if verified_only { "WHERE verified = 1" } else { "" };
        self.query_businesses(
            &format!("SELECT {BUSINESS_COLUMNS} FROM businesses {filter} ORDER BY name"),
            (),
        )
        .await
    }

    /// The verification queue, oldest first.
    pub async fn list_unverified_businesses(&self) -> Result<Vec<Business>, DatabaseError> {
        self.query_businesses(
            &format!("SELECT {BUSINESS_COLUMNS} FROM businesses WHERE verified = 0 ORDER BY created_at"),
            (),
        )
        .await
    }

    pub async fn list_businesses_by_owner(&self, owner_id: &str) -> Result<Vec<Business>, DatabaseError> {
        self.query_businesses(
            &format!("SELECT {BUSINESS_COLUMNS} FROM businesses WHERE owner_id = ?1 ORDER BY name"),
            [owner_id],
        )
        .await
    }

    async fn query_businesses(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<Vec<Business>, DatabaseError> {
        let mut rows = self.db().conn().query(sql, params).await?;
        let mut businesses = Vec::new();
        while let Some(row) = rows.next().await? {
            businesses.push(row_to_business(&row)?);
        }
        Ok(businesses)
    }

    /// Businesses joined with their category and type slugs, ready for the
    /// directory page.
    pub async fn business_listings(
        &self,
        verified_only: bool,
    ) -> Result<Vec<BusinessListing>, DatabaseError> {
        let tree = self.category_tree().await?;
        let businesses = self.list_businesses(verified_only).await?;
        Ok(tree.resolve(&businesses))
    }

    /// Replace the editable profile fields. Verification is untouched.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown business or type and
    /// `DatabaseError::Conflict` if the new slug is taken.
    pub async fn update_business_profile(
        &self,
        id: &str,
        profile: &BusinessProfile,
    ) -> Result<Business, DatabaseError> {
        self.get_business_type_by_id(&profile.type_id).await?;
        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE businesses SET type_id = ?1, name = ?2, slug = ?3, description = ?4,
                     email = ?5, phone = ?6, website = ?7, address = ?8, logo_url = ?9,
                     updated_at = ?10
                 WHERE id = ?11",
                libsql::params![
                    profile.type_id.as_str(),
                    profile.name.as_str(),
                    profile.slug.as_str(),
                    profile.description.as_deref(),
                    profile.email.as_deref(),
                    profile.phone.as_deref(),
                    profile.website.as_deref(),
                    profile.address.as_deref(),
                    profile.logo_url.as_deref(),
                    Utc::now().to_rfc3339(),
                    id
                ],
            )
            .await
            .map_err(slug_conflict(&profile.slug))?;
        if changed == 0 {
            return Err(DatabaseError::not_found("business", id));
        }
        self.get_business(id).await
    }

    /// Mark a business verified (or revoke it).
    pub async fn set_business_verified(&self, id: &str, verified: bool) -> Result<Business, DatabaseError> {
        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE businesses SET verified = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![i64::from(verified), Utc::now().to_rfc3339(), id],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("business", id));
        }
        info!(business_id = id, verified, "business verification changed");
        self.get_business(id).await
    }

    /// Set or clear the logo after an upload.
    pub async fn set_business_logo(&self, id: &str, logo_url: Option<&str>) -> Result<(), DatabaseError> {
        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE businesses SET logo_url = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![logo_url, Utc::now().to_rfc3339(), id],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("business", id));
        }
        Ok(())
    }
}
