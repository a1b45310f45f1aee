//! Services and gallery images shown on a business profile.

use chrono::Utc;

use chamber_core::entities::{BusinessService, GalleryImage};
use chamber_core::forms::NewService;
use chamber_core::ids::{PREFIX_IMAGE, PREFIX_SERVICE};

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime};
use crate::service::ChamberService;

fn row_to_service(row: &libsql::Row) -> Result<BusinessService, DatabaseError> {
    Ok(BusinessService {
        id: row.get::<String>(0)?,
        business_id: row.get::<String>(1)?,
        title: row.get::<String>(2)?,
        description: get_opt_string(row, 3)?,
        image_url: get_opt_string(row, 4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

fn row_to_image(row: &libsql::Row) -> Result<GalleryImage, DatabaseError> {
    Ok(GalleryImage {
        id: row.get::<String>(0)?,
        business_id: row.get::<String>(1)?,
        url: row.get::<String>(2)?,
        caption: get_opt_string(row, 3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl ChamberService {
    pub async fn add_service(
        &self,
        business_id: &str,
        new: &NewService,
    ) -> Result<BusinessService, DatabaseError> {
        self.get_business(business_id).await?;
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_SERVICE).await?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO business_services (id, business_id, title, description, image_url, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    id.as_str(),
                    business_id,
                    new.title.as_str(),
                    new.description.as_deref(),
                    new.image_url.as_deref(),
                    now.to_rfc3339()
                ],
            )
            .await?;
        Ok(BusinessService {
            id,
            business_id: business_id.to_string(),
            title: new.title.clone(),
            description: new.description.clone(),
            image_url: new.image_url.clone(),
            created_at: now,
        })
    }

    pub async fn list_services(&self, business_id: &str) -> Result<Vec<BusinessService>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, business_id, title, description, image_url, created_at
                 FROM business_services WHERE business_id = ?1 ORDER BY created_at",
                [business_id],
            )
            .await?;
        let mut services = Vec::new();
        while let Some(row) = rows.next().await? {
            services.push(row_to_service(&row)?);
        }
        Ok(services)
    }

    /// Remove a service. Scoped to `business_id` so owners cannot touch
    /// another business's rows.
    pub async fn remove_service(&self, business_id: &str, service_id: &str) -> Result<(), DatabaseError> {
        let removed = self
            .db()
            .conn()
            .execute(
                "DELETE FROM business_services WHERE id = ?1 AND business_id = ?2",
                [service_id, business_id],
            )
            .await?;
        if removed == 0 {
            return Err(DatabaseError::not_found("service", service_id));
        }
        Ok(())
    }

    pub async fn add_gallery_image(
        &self,
        business_id: &str,
        url: &str,
        caption: Option<&str>,
    ) -> Result<GalleryImage, DatabaseError> {
        self.get_business(business_id).await?;
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_IMAGE).await?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO gallery_images (id, business_id, url, caption, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![id.as_str(), business_id, url, caption, now.to_rfc3339()],
            )
            .await?;
        Ok(GalleryImage {
            id,
            business_id: business_id.to_string(),
            url: url.to_string(),
            caption: caption.map(String::from),
            created_at: now,
        })
    }

    pub async fn list_gallery(&self, business_id: &str) -> Result<Vec<GalleryImage>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, business_id, url, caption, created_at
                 FROM gallery_images WHERE business_id = ?1 ORDER BY created_at",
                [business_id],
            )
            .await?;
        let mut images = Vec::new();
        while let Some(row) = rows.next().await? {
            images.push(row_to_image(&row)?);
        }
        Ok(images)
    }

    pub async fn remove_gallery_image(&self, business_id: &str, image_id: &str) -> Result<(), DatabaseError> {
        let removed = self
            .db()
            .conn()
            .execute(
                "DELETE FROM gallery_images WHERE id = ?1 AND business_id = ?2",
                [image_id, business_id],
            )
            .await?;
        if removed == 0 {
            return Err(DatabaseError::not_found("image", image_id));
        }
        Ok(())
    }
}
