//! Repository modules implementing CRUD operations for Chamber entities.
//!
//! Each module adds methods to `ChamberService` via `impl ChamberService` blocks.

pub mod business;
pub mod business_type;
pub mod category;
pub mod content;
pub mod enquiry;
pub mod media;
pub mod receipt;
pub mod session;
pub mod user;
