use chamber_core::entities::{Business, BusinessType, User};
use chamber_core::errors::CoreError;
use chamber_db::error::DatabaseError;

use crate::context::AppContext;

/// Business by id, falling back to slug.
pub async fn find_business(ctx: &AppContext, key: &str) -> anyhow::Result<Business> {
    match ctx.service.get_business(key).await {
        Ok(business) => Ok(business),
        Err(DatabaseError::NotFound { .. }) => Ok(ctx.service.get_business_by_slug(key).await?),
        Err(error) => Err(error.into()),
    }
}

/// Type from `category/type` slugs or a type id.
pub async fn resolve_type(ctx: &AppContext, raw: &str) -> anyhow::Result<BusinessType> {
    let raw = raw.trim();
    let business_type = match raw.split_once('/') {
        Some((category, business_type)) => {
            ctx.service.get_business_type(category, business_type).await?
        }
        None => ctx.service.get_business_type_by_id(raw).await?,
    };
    Ok(business_type)
}

/// User by email (anything with an `@`) or id.
pub async fn find_user(ctx: &AppContext, key: &str) -> anyhow::Result<User> {
    if key.contains('@') {
        let email = key.trim().to_lowercase();
        return ctx
            .service
            .get_user_by_email(&email)
            .await?
            .ok_or_else(|| CoreError::not_found("user", email).into());
    }
    Ok(ctx.service.get_user(key).await?)
}

/// Where owner notifications go: the business contact, else the owner.
pub async fn contact_address(ctx: &AppContext, business: &Business) -> anyhow::Result<String> {
    if let Some(email) = business.email.as_deref() {
        return Ok(email.to_string());
    }
    Ok(ctx.service.get_user(&business.owner_id).await?.email)
}
