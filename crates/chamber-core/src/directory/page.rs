//! Per-view directory state.
//!
//! A `DirectoryPage` owns the snapshot fetched at load time, the transient
//! [`FilterState`], and the currently visible set. Each page view gets its own
//! instance; nothing here is shared between requests.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::grid::{RowSizes, generate_grid};

use super::filter::{Listing, Selector, filter_by_category, filter_by_name, filter_by_type, name_matches};

/// Transient filter inputs for one page view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub query: String,
    pub category: Selector,
    #[serde(rename = "type")]
    pub business_type: Selector,
}

/// How the name query and the category/type selection combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CompositionPolicy {
    /// Each input re-derives the visible set from the snapshot using only its
    /// own predicate; the most recent input decides what is shown.
    #[default]
    LatestWins,
    /// Every active predicate applies at once (query AND category AND type).
    Conjunctive,
}

/// Message shown in place of an empty grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EmptyMessage {
    Businesses,
    Images,
}

impl EmptyMessage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Businesses => "No businesses found",
            Self::Images => "No images found",
        }
    }
}

/// What the page renders: grid rows, or the empty message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DirectoryView<T> {
    Grid { rows: Vec<Vec<T>> },
    Empty { message: &'static str },
}

/// Filter state and visible set for one view of a directory.
#[derive(Debug, Clone)]
pub struct DirectoryPage<T> {
    snapshot: Vec<T>,
    visible: Vec<T>,
    state: FilterState,
    policy: CompositionPolicy,
    empty: EmptyMessage,
}

impl<T: Listing + Clone> DirectoryPage<T> {
    /// Start a view over `snapshot` with nothing filtered.
    #[must_use]
    pub fn new(snapshot: Vec<T>, empty: EmptyMessage) -> Self {
        Self {
            visible: snapshot.clone(),
            snapshot,
            state: FilterState::default(),
            policy: CompositionPolicy::default(),
            empty,
        }
    }

    #[must_use]
    pub const fn with_policy(mut self, policy: CompositionPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub const fn state(&self) -> &FilterState {
        &self.state
    }

    #[must_use]
    pub const fn policy(&self) -> CompositionPolicy {
        self.policy
    }

    #[must_use]
    pub fn snapshot(&self) -> &[T] {
        &self.snapshot
    }

    #[must_use]
    pub fn visible(&self) -> &[T] {
        &self.visible
    }

    /// The search box changed.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.query = query.into();
        self.visible = match self.policy {
            CompositionPolicy::LatestWins => filter_by_name(&self.snapshot, &self.state.query),
            CompositionPolicy::Conjunctive => self.conjunctive(),
        };
    }

    /// The category selector changed. Resets the type selector to `All`.
    pub fn select_category(&mut self, category: Selector) {
        self.state.category = category;
        self.state.business_type = Selector::All;
        self.visible = match self.policy {
            CompositionPolicy::LatestWins => {
                filter_by_category(&self.snapshot, &self.state.category)
            }
            CompositionPolicy::Conjunctive => self.conjunctive(),
        };
    }

    /// The type selector changed.
    ///
    /// Types only exist under a concrete category, so this is ignored (and
    /// returns `false`) while the category is `All`.
    pub fn select_type(&mut self, business_type: Selector) -> bool {
        if self.state.category.is_all() {
            return false;
        }
        self.state.business_type = business_type;
        self.visible = match self.policy {
            CompositionPolicy::LatestWins => {
                let in_category = filter_by_category(&self.snapshot, &self.state.category);
                filter_by_type(&in_category, &self.state.business_type)
            }
            CompositionPolicy::Conjunctive => self.conjunctive(),
        };
        true
    }

    /// Replay a whole filter state as a visitor would enter it: query, then
    /// category, then type. Inputs left at their defaults are skipped.
    pub fn apply(&mut self, state: FilterState) {
        let FilterState {
            query,
            category,
            business_type,
        } = state;
        if !query.is_empty() {
            self.set_query(query);
        }
        if !category.is_all() {
            self.select_category(category);
        }
        if !business_type.is_all() {
            self.select_type(business_type);
        }
    }

    /// Back to the unfiltered snapshot.
    pub fn reset(&mut self) {
        self.state = FilterState::default();
        self.visible = self.snapshot.clone();
    }

    /// Lay out the visible set. `extra` is prepended as the first tile.
    #[must_use]
    pub fn render(&self, sizes: RowSizes, extra: Option<T>) -> DirectoryView<T> {
        if self.visible.is_empty() {
            return DirectoryView::Empty {
                message: self.empty.as_str(),
            };
        }
        DirectoryView::Grid {
            rows: generate_grid(self.visible.iter().cloned(), sizes, extra),
        }
    }

    fn conjunctive(&self) -> Vec<T> {
        self.snapshot
            .iter()
            .filter(|item| name_matches(*item, &self.state.query))
            .filter(|item| self.state.category.matches(item.category_slug()))
            .filter(|item| self.state.business_type.matches(item.type_slug()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::directory::item::fixtures::{business, business_type, category};
    use crate::directory::{BusinessListing, CategoryTree, DirectoryItem};

    fn listings() -> Vec<BusinessListing> {
        let tree = CategoryTree::new(vec![
            category(
                "c1",
                "Retail",
                "retail",
                vec![
                    business_type("t1", "c1", "Grocery", "grocery"),
                    business_type("t2", "c1", "Clothing", "clothing"),
                ],
            ),
            category("c2", "Services", "services", vec![business_type("t3", "c2", "Legal", "legal")]),
        ]);
        tree.resolve(&[
            business("b1", "Acme Mart", "t1"),
            business("b2", "Corner Threads", "t2"),
            business("b3", "Acme Legal", "t3"),
            business("b4", "Fresh Greens", "t1"),
        ])
    }

    fn names(page: &DirectoryPage<BusinessListing>) -> Vec<&str> {
        page.visible().iter().map(|l| l.item.name.as_str()).collect()
    }

    #[test]
    fn category_then_type_then_all() {
        let tree = CategoryTree::new(vec![category(
            "c1",
            "Retail",
            "retail",
            vec![business_type("t1", "c1", "Grocery", "grocery")],
        )]);
        let snapshot = tree.resolve(&[business("b1", "Acme Mart", "t1")]);
        let mut page = DirectoryPage::new(snapshot.clone(), EmptyMessage::Businesses);

        page.select_category(Selector::parse("retail"));
        assert!(page.select_type(Selector::parse("grocery")));
        assert_eq!(names(&page), vec!["Acme Mart"]);

        page.select_category(Selector::All);
        assert_eq!(page.visible(), snapshot.as_slice());
        assert_eq!(page.state().business_type, Selector::All);
    }

    #[test]
    fn category_change_resets_type() {
        let mut page = DirectoryPage::new(listings(), EmptyMessage::Businesses);
        page.select_category(Selector::parse("retail"));
        page.select_type(Selector::parse("clothing"));
        assert_eq!(names(&page), vec!["Corner Threads"]);

        page.select_category(Selector::parse("retail"));
        assert_eq!(page.state().business_type, Selector::All);
        assert_eq!(names(&page), vec!["Acme Mart", "Corner Threads", "Fresh Greens"]);
    }

    #[test]
    fn type_is_ignored_without_category() {
        let mut page = DirectoryPage::new(listings(), EmptyMessage::Businesses);
        assert!(!page.select_type(Selector::parse("grocery")));
        assert_eq!(page.visible().len(), 4);
        assert_eq!(page.state().business_type, Selector::All);
    }

    #[test]
    fn all_always_restores_snapshot() {
        let mut page = DirectoryPage::new(listings(), EmptyMessage::Businesses);
        page.set_query("acme");
        page.select_category(Selector::parse("services"));
        page.select_category(Selector::All);
        assert_eq!(page.visible(), page.snapshot());
    }

    #[test]
    fn latest_wins_category_ignores_active_query() {
        let mut page = DirectoryPage::new(listings(), EmptyMessage::Businesses);
        page.set_query("acme");
        assert_eq!(names(&page), vec!["Acme Mart", "Acme Legal"]);

        page.select_category(Selector::parse("retail"));
        assert_eq!(page.state().query, "acme");
        assert_eq!(names(&page), vec!["Acme Mart", "Corner Threads", "Fresh Greens"]);
    }

    #[test]
    fn latest_wins_query_ignores_active_category() {
        let mut page = DirectoryPage::new(listings(), EmptyMessage::Businesses);
        page.select_category(Selector::parse("services"));
        page.set_query("acme");
        assert_eq!(names(&page), vec!["Acme Mart", "Acme Legal"]);
    }

    #[test]
    fn conjunctive_applies_every_predicate() {
        let mut page = DirectoryPage::new(listings(), EmptyMessage::Businesses)
            .with_policy(CompositionPolicy::Conjunctive);
        page.set_query("acme");
        page.select_category(Selector::parse("retail"));
        assert_eq!(names(&page), vec!["Acme Mart"]);

        page.select_type(Selector::parse("clothing"));
        assert!(page.visible().is_empty());

        page.set_query("");
        assert_eq!(names(&page), vec!["Corner Threads"]);
    }

    #[test]
    fn conjunctive_all_keeps_the_query() {
        let mut page = DirectoryPage::new(listings(), EmptyMessage::Businesses)
            .with_policy(CompositionPolicy::Conjunctive);
        page.set_query("acme");
        page.select_category(Selector::parse("retail"));
        assert_eq!(names(&page), vec!["Acme Mart"]);

        page.select_category(Selector::All);
        assert_eq!(names(&page), vec!["Acme Mart", "Acme Legal"]);
        assert_eq!(page.snapshot().len(), 4);
    }

    #[test]
    fn latest_wins_all_restores_snapshot() {
        let mut page = DirectoryPage::new(listings(), EmptyMessage::Businesses);
        page.set_query("acme");
        page.select_category(Selector::parse("retail"));
        page.select_category(Selector::All);
        assert_eq!(page.visible().len(), 4);
    }

    #[test]
    fn apply_replays_state() {
        let state = FilterState {
            query: "fresh".into(),
            category: Selector::parse("retail"),
            business_type: Selector::parse("grocery"),
        };

        let mut conj = DirectoryPage::new(listings(), EmptyMessage::Businesses)
            .with_policy(CompositionPolicy::Conjunctive);
        conj.apply(state.clone());
        assert_eq!(names(&conj), vec!["Fresh Greens"]);

        let mut latest = DirectoryPage::new(listings(), EmptyMessage::Businesses);
        latest.apply(state);
        assert_eq!(names(&latest), vec!["Acme Mart", "Fresh Greens"]);
    }

    #[test]
    fn reset_clears_state() {
        let mut page = DirectoryPage::new(listings(), EmptyMessage::Businesses);
        page.set_query("zzz");
        assert!(page.visible().is_empty());
        page.reset();
        assert_eq!(page.state(), &FilterState::default());
        assert_eq!(page.visible().len(), 4);
    }

    #[test]
    fn empty_visible_set_renders_message() {
        let mut page = DirectoryPage::new(listings(), EmptyMessage::Businesses);
        page.set_query("no such business");
        assert_eq!(
            page.render(RowSizes::default(), None),
            DirectoryView::Empty {
                message: "No businesses found"
            }
        );

        let gallery: DirectoryPage<DirectoryItem> = DirectoryPage::new(Vec::new(), EmptyMessage::Images);
        assert_eq!(
            gallery.render(RowSizes::default(), None),
            DirectoryView::Empty {
                message: "No images found"
            }
        );
    }

    #[test]
    fn category_grid_gets_all_tile_first() {
        let tree = CategoryTree::new(vec![
            category("c1", "Retail", "retail", Vec::new()),
            category("c2", "Services", "services", Vec::new()),
        ]);
        let page = DirectoryPage::new(tree.category_tiles(), EmptyMessage::Businesses);
        let DirectoryView::Grid { rows } = page.render(RowSizes::new(2, 1).unwrap(), Some(DirectoryItem::all_tile())) else {
            panic!("expected grid");
        };
        let slugs: Vec<Vec<&str>> = rows
            .iter()
            .map(|row| row.iter().map(|t| t.slug.as_str()).collect())
            .collect();
        assert_eq!(slugs, vec![vec!["all", "retail"], vec!["services"]]);
    }

    #[test]
    fn filter_state_serializes_type_key() {
        let state = FilterState {
            query: "a".into(),
            category: Selector::parse("retail"),
            business_type: Selector::All,
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["type"], "all");
        assert_eq!(json["category"], "retail");
    }
}
