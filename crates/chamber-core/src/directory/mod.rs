//! Directory presentation engine.
//!
//! Takes a flat collection of named, sluggable records (categories, types, or
//! businesses), filters it by free text and by category/type selection, and
//! hands the visible set to the grid layout.
//!
//! - [`item`]: the `DirectoryItem` tile projection and its href targets
//! - [`filter`]: name and category/type reducers over a snapshot
//! - [`page`]: per-page-view filter state wired to the reducers

pub mod filter;
pub mod item;
pub mod page;

pub use filter::{Listing, Selector, filter_by_category, filter_by_name, filter_by_type};
pub use item::{BusinessListing, CategoryTree, DirectoryItem, ensure_unique_slugs};
pub use page::{CompositionPolicy, DirectoryPage, DirectoryView, EmptyMessage, FilterState};
