//! Shared fixtures for repo tests.

use chamber_core::entities::{Business, BusinessCategory, BusinessType, User};
use chamber_core::enums::UserRole;
use chamber_core::forms::{BusinessProfile, NewBusinessType, NewCategory, NewUser};
use chamber_core::slugify;

use crate::service::ChamberService;

/// In-memory service with the schema applied.
pub async fn test_service() -> ChamberService {
    ChamberService::new_local(":memory:").await.unwrap()
}

pub async fn seed_user(svc: &ChamberService, name: &str, role: UserRole) -> User {
    let new = NewUser {
        name: name.to_string(),
        email: format!("{}@chamber.test", slugify(name)),
    };
    svc.create_user(&new, role).await.unwrap()
}

pub async fn seed_category(svc: &ChamberService, name: &str) -> BusinessCategory {
    svc.create_category(&NewCategory {
        name: name.to_string(),
        slug: slugify(name),
    })
    .await
    .unwrap()
}

pub async fn seed_type(svc: &ChamberService, category_slug: &str, name: &str) -> BusinessType {
    svc.create_business_type(&NewBusinessType {
        category_slug: category_slug.to_string(),
        name: name.to_string(),
        slug: slugify(name),
    })
    .await
    .unwrap()
}

pub fn profile(name: &str, type_id: &str) -> BusinessProfile {
    BusinessProfile {
        name: name.to_string(),
        slug: slugify(name),
        type_id: type_id.to_string(),
        description: None,
        email: None,
        phone: None,
        website: None,
        address: None,
        logo_url: None,
    }
}

pub async fn seed_business(
    svc: &ChamberService,
    owner: &User,
    name: &str,
    type_id: &str,
) -> Business {
    svc.create_business(&owner.id, &profile(name, type_id))
        .await
        .unwrap()
}
