//! # chamber-core
//!
//! Core types, the directory presentation engine, and form validation for the
//! Chamber business directory.
//!
//! This crate provides the foundational types shared across all Chamber crates:
//! - Entity structs for the directory domain (users, categories, businesses, etc.)
//! - Role and status enums
//! - ID prefix constants
//! - The slug transform used for routing keys
//! - Grid layout, directory filtering, and the directory page state
//! - Typed form validation (`Validation::Valid` / `Validation::Invalid`)
//! - The session store seam shared by the database and auth crates
//! - CSV export helpers
//! - Cross-cutting error types

pub mod directory;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod export;
pub mod forms;
pub mod grid;
pub mod identity;
pub mod ids;
pub mod responses;
pub mod slug;
pub mod validation;

pub use grid::{RowSizes, generate_grid};
pub use slug::slugify;
