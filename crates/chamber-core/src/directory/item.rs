//! Directory tiles and the category tree they are projected from.

use std::collections::{HashMap, HashSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Business, BusinessCategory, BusinessType, CategoryWithTypes, GalleryImage};
use crate::errors::CoreError;

use super::filter::Listing;

/// Slug of the synthetic tile that resets the directory to every category.
pub const ALL_SLUG: &str = "all";

/// Route of the unfiltered directory, where the "All" tile points.
pub const DIRECTORY_HREF: &str = "/directory";

/// A display tile: a category, a type, or a business, with the route it
/// links to.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct DirectoryItem {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub href: String,
}

impl DirectoryItem {
    /// The "All" tile placed in front of the category grid.
    #[must_use]
    pub fn all_tile() -> Self {
        Self {
            id: String::from(ALL_SLUG),
            name: String::from("All"),
            slug: String::from(ALL_SLUG),
            href: String::from(DIRECTORY_HREF),
        }
    }

    /// Type tiles are routed under their category, so the category slug is
    /// needed alongside the type.
    #[must_use]
    pub fn for_type(category_slug: &str, business_type: &BusinessType) -> Self {
        Self {
            id: business_type.id.clone(),
            name: business_type.name.clone(),
            slug: business_type.slug.clone(),
            href: type_href(category_slug, &business_type.slug),
        }
    }
}

impl From<&BusinessCategory> for DirectoryItem {
    fn from(category: &BusinessCategory) -> Self {
        Self {
            id: category.id.clone(),
            name: category.name.clone(),
            slug: category.slug.clone(),
            href: category_href(&category.slug),
        }
    }
}

impl From<&Business> for DirectoryItem {
    fn from(business: &Business) -> Self {
        Self {
            id: business.id.clone(),
            name: business.name.clone(),
            slug: business.slug.clone(),
            href: business_href(&business.id),
        }
    }
}

impl Listing for DirectoryItem {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Detail route for a category tile.
#[must_use]
pub fn category_href(category_slug: &str) -> String {
    format!("/directory/{category_slug}")
}

/// Detail route for a type tile.
#[must_use]
pub fn type_href(category_slug: &str, type_slug: &str) -> String {
    format!("/directory/{category_slug}/{type_slug}")
}

/// Profile route for a business tile. Businesses are keyed by id.
#[must_use]
pub fn business_href(business_id: &str) -> String {
    format!("/business/{business_id}")
}

/// Fail if two items share a slug.
///
/// # Errors
///
/// Returns `CoreError::Conflict` naming the first repeated slug.
pub fn ensure_unique_slugs<'a>(
    items: impl IntoIterator<Item = &'a DirectoryItem>,
) -> Result<(), CoreError> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.slug.as_str()) {
            return Err(CoreError::Conflict {
                entity_type: String::from("slug"),
                key: item.slug.clone(),
            });
        }
    }
    Ok(())
}

/// A business tile joined with the category and type it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BusinessListing {
    #[serde(flatten)]
    pub item: DirectoryItem,
    pub category_slug: Option<String>,
    pub type_slug: Option<String>,
    pub type_name: Option<String>,
    pub logo_url: Option<String>,
    pub verified: bool,
}

impl Listing for BusinessListing {
    fn name(&self) -> &str {
        &self.item.name
    }

    fn category_slug(&self) -> Option<&str> {
        self.category_slug.as_deref()
    }

    fn type_slug(&self) -> Option<&str> {
        self.type_slug.as_deref()
    }
}

/// Gallery images are searched by caption.
impl Listing for GalleryImage {
    fn name(&self) -> &str {
        self.caption.as_deref().unwrap_or_default()
    }
}

/// Categories with their nested types, as fetched once per page load.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryTree {
    categories: Vec<CategoryWithTypes>,
}

impl CategoryTree {
    #[must_use]
    pub const fn new(categories: Vec<CategoryWithTypes>) -> Self {
        Self { categories }
    }

    #[must_use]
    pub fn categories(&self) -> &[CategoryWithTypes] {
        &self.categories
    }

    #[must_use]
    pub fn find_category(&self, slug: &str) -> Option<&CategoryWithTypes> {
        self.categories.iter().find(|c| c.category.slug == slug)
    }

    #[must_use]
    pub fn find_type(&self, category_slug: &str, type_slug: &str) -> Option<&BusinessType> {
        self.find_category(category_slug)?
            .types
            .iter()
            .find(|t| t.slug == type_slug)
    }

    /// Tiles for the top-level category grid (without the "All" tile).
    #[must_use]
    pub fn category_tiles(&self) -> Vec<DirectoryItem> {
        self.categories
            .iter()
            .map(|c| DirectoryItem::from(&c.category))
            .collect()
    }

    /// Tiles for the types of one category, or `None` for an unknown slug.
    #[must_use]
    pub fn type_tiles(&self, category_slug: &str) -> Option<Vec<DirectoryItem>> {
        self.find_category(category_slug)
            .map(|c| {
                c.types
                    .iter()
                    .map(|t| DirectoryItem::for_type(&c.category.slug, t))
                    .collect()
            })
    }

    /// Join businesses against the tree by `type_id`.
    ///
    /// Businesses whose type is not in the tree keep `None` slugs, so they
    /// only show up under the "All" selection.
    #[must_use]
    pub fn resolve(&self, businesses: &[Business]) -> Vec<BusinessListing> {
        let by_type: HashMap<&str, (&BusinessCategory, &BusinessType)> = self
            .categories
            .iter()
            .flat_map(|c| c.types.iter().map(move |t| (t.id.as_str(), (&c.category, t))))
            .collect();

        businesses
            .iter()
            .map(|business| {
                let owner = by_type.get(business.type_id.as_str());
                BusinessListing {
                    item: DirectoryItem::from(business),
                    category_slug: owner.map(|(c, _)| c.slug.clone()),
                    type_slug: owner.map(|(_, t)| t.slug.clone()),
                    type_name: owner.map(|(_, t)| t.name.clone()),
                    logo_url: business.logo_url.clone(),
                    verified: business.verified,
                }
            })
            .collect()
    }
}
