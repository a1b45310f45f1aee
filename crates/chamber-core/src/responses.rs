//! CLI response types returned as JSON by `chamber` commands.

use serde::Serialize;

use crate::directory::{CompositionPolicy, DirectoryView, FilterState};
use crate::entities::{Business, BusinessService, BusinessType, CategoryWithTypes, Enquiry, GalleryImage, User};

/// Response from `chamber directory categories|types|businesses`.
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryResponse<T> {
    pub state: FilterState,
    pub policy: CompositionPolicy,
    pub total: usize,
    pub visible: usize,
    pub view: DirectoryView<T>,
}

/// Response from `chamber business get`: the public profile.
#[derive(Debug, Clone, Serialize)]
pub struct BusinessProfileResponse {
    pub business: Business,
    pub owner: Option<User>,
    pub business_type: Option<BusinessType>,
    pub services: Vec<BusinessService>,
    pub gallery: Vec<GalleryImage>,
    /// Label of the enquiry button for the current viewer.
    pub enquire_action: String,
}

/// Response from `chamber category create`.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryCreateResponse {
    pub category: CategoryWithTypes,
    pub href: String,
}

/// Response from `chamber enquiry create`.
#[derive(Debug, Clone, Serialize)]
pub struct EnquiryCreateResponse {
    pub enquiry: Enquiry,
    /// Status code returned by the mail provider for the owner notification.
    pub notification_status: Option<u16>,
}
