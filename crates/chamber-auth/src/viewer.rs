//! Who is looking at a page, and what they may do.

use chamber_core::entities::Business;
use chamber_core::identity::{AuthIdentity, SessionStore, SessionToken};
use serde::Serialize;

use crate::error::AuthError;

pub const ENQUIRE_LABEL: &str = "Enquire";
pub const SIGN_IN_TO_ENQUIRE_LABEL: &str = "Sign in to enquire";

/// The current visitor. Pages only read this; they never look at cookies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "identity", rename_all = "snake_case")]
pub enum Viewer {
    #[default]
    Anonymous,
    SignedIn(AuthIdentity),
}

impl Viewer {
    #[must_use]
    pub fn from_identity(identity: Option<AuthIdentity>) -> Self {
        identity.map_or(Self::Anonymous, Self::SignedIn)
    }

    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        matches!(self, Self::SignedIn(_))
    }

    #[must_use]
    pub const fn identity(&self) -> Option<&AuthIdentity> {
        match self {
            Self::SignedIn(identity) => Some(identity),
            Self::Anonymous => None,
        }
    }

    /// Label of the enquiry button on a business profile.
    #[must_use]
    pub const fn enquire_action(&self) -> &'static str {
        if self.is_signed_in() {
            ENQUIRE_LABEL
        } else {
            SIGN_IN_TO_ENQUIRE_LABEL
        }
    }

    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` for anonymous viewers.
    pub fn require_signed_in(&self) -> Result<&AuthIdentity, AuthError> {
        self.identity().ok_or(AuthError::NotAuthenticated)
    }

    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` or `AuthError::Forbidden`.
    pub fn require_admin(&self) -> Result<&AuthIdentity, AuthError> {
        let identity = self.require_signed_in()?;
        if identity.role.is_admin() {
            Ok(identity)
        } else {
            Err(AuthError::Forbidden("admin role required".into()))
        }
    }

    /// The owner or an admin may edit a business, its services, and gallery.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` or `AuthError::Forbidden`.
    pub fn require_manager_of(&self, business: &Business) -> Result<&AuthIdentity, AuthError> {
        let identity = self.require_signed_in()?;
        if identity.role.is_admin() || identity.user_id == business.owner_id {
            Ok(identity)
        } else {
            Err(AuthError::Forbidden(format!(
                "not the owner of business {}",
                business.id
            )))
        }
    }
}

/// Resolve an optional token to the signed-in user id through any store.
///
/// # Errors
///
/// Propagates the store's error.
pub async fn resolve_user_id<S: SessionStore>(
    store: &S,
    token: Option<&SessionToken>,
) -> Result<Option<String>, S::Error> {
    match token {
        Some(token) => store.get(token).await,
        None => Ok(None),
    }
}
