//! Name and category/type reducers.
//!
//! Every reducer reads from the original snapshot and returns a fresh
//! visible set; none of them compose with a previous result.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::item::ALL_SLUG;

/// A record the directory can filter.
pub trait Listing {
    /// Display name matched by the free-text query.
    fn name(&self) -> &str;

    /// Slug of the category this record belongs to, if any.
    fn category_slug(&self) -> Option<&str> {
        None
    }

    /// Slug of the type this record belongs to, if any.
    fn type_slug(&self) -> Option<&str> {
        None
    }
}

impl<T: Listing + ?Sized> Listing for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn category_slug(&self) -> Option<&str> {
        (**self).category_slug()
    }

    fn type_slug(&self) -> Option<&str> {
        (**self).type_slug()
    }
}

/// A category or type selection: the `"all"` sentinel or one slug.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Selector {
    #[default]
    All,
    Slug(String),
}

impl Selector {
    /// Parse a raw selector. `"all"` and the empty string both mean `All`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == ALL_SLUG {
            Self::All
        } else {
            Self::Slug(raw.to_string())
        }
    }

    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_SLUG,
            Self::Slug(slug) => slug,
        }
    }

    /// Whether a record's slug passes this selector.
    #[must_use]
    pub fn matches(&self, slug: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Slug(wanted) => slug == Some(wanted.as_str()),
        }
    }
}

impl FromStr for Selector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Selector {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Selector {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Case-insensitive substring match on the name. An empty query keeps everything.
#[must_use]
pub fn name_matches<T: Listing + ?Sized>(item: &T, query: &str) -> bool {
    query.is_empty() || item.name().to_lowercase().contains(&query.to_lowercase())
}

/// Keep snapshot items whose name contains `query`, ignoring case.
pub fn filter_by_name<T: Listing + Clone>(snapshot: &[T], query: &str) -> Vec<T> {
    snapshot
        .iter()
        .filter(|item| name_matches(*item, query))
        .cloned()
        .collect()
}

/// Keep snapshot items in the selected category. `All` restores the snapshot.
pub fn filter_by_category<T: Listing + Clone>(snapshot: &[T], selector: &Selector) -> Vec<T> {
    snapshot
        .iter()
        .filter(|item| selector.matches(item.category_slug()))
        .cloned()
        .collect()
}

/// Keep snapshot items of the selected type. `All` restores the snapshot.
pub fn filter_by_type<T: Listing + Clone>(snapshot: &[T], selector: &Selector) -> Vec<T> {
    snapshot
        .iter()
        .filter(|item| selector.matches(item.type_slug()))
        .cloned()
        .collect()
}
