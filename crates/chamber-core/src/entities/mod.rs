//! Entity structs for all Chamber domain objects.
//!
//! Each entity maps to a table in the libSQL database (see
//! `chamber-db/migrations`). All structs derive `Serialize`, `Deserialize`, and
//! `JsonSchema` for JSON output and schema generation.

mod business;
mod category;
mod content;
mod enquiry;
mod media;
mod receipt;
mod session;
mod user;

pub use business::Business;
pub use category::{BusinessCategory, BusinessType, CategoryWithTypes};
pub use content::{BlogPost, Event};
pub use enquiry::Enquiry;
pub use media::{BusinessService, GalleryImage};
pub use receipt::Receipt;
pub use session::SessionRecord;
pub use user::User;
