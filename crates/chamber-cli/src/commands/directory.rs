//! `chamber directory`: the public grids.
//!
//! Each invocation is one page view: load the snapshot once, replay the
//! filter inputs, then render the grid (or the empty message).

use chamber_core::directory::{
    CategoryTree, CompositionPolicy, DirectoryItem, DirectoryPage, DirectoryView, EmptyMessage, FilterState, Listing,
    Selector, ensure_unique_slugs,
};
use chamber_core::errors::CoreError;
use chamber_core::responses::DirectoryResponse;
use serde::Serialize;

use crate::cli::subcommands::{BusinessGridArgs, DirectoryCommands};
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::lookup::find_business;
use crate::context::AppContext;
use crate::output::table::render_grid;
use crate::output::{output, output_text};

/// Handle `chamber directory`.
pub async fn handle(action: &DirectoryCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        DirectoryCommands::Categories { query } => {
            let tree = ctx.service.category_tree().await?;
            let tiles = tree.category_tiles();
            ensure_unique_slugs(&tiles)?;
            let mut page = DirectoryPage::new(tiles, EmptyMessage::Businesses);
            if let Some(query) = query {
                page.set_query(query.as_str());
            }
            emit(&page, Some(DirectoryItem::all_tile()), ctx, flags)
        }
        DirectoryCommands::Types { category, query } => {
            let tree = ctx.service.category_tree().await?;
            let tiles = tree
                .type_tiles(category)
                .ok_or_else(|| CoreError::not_found("category", category.as_str()))?;
            ensure_unique_slugs(&tiles)?;
            let mut page = DirectoryPage::new(tiles, EmptyMessage::Businesses);
            if let Some(query) = query {
                page.set_query(query.as_str());
            }
            emit(&page, None, ctx, flags)
        }
        DirectoryCommands::Businesses(args) => businesses(args, ctx, flags).await,
        DirectoryCommands::Gallery { business, query } => {
            let business = find_business(ctx, business).await?;
            let images = ctx.service.list_gallery(&business.id).await?;
            let mut page = DirectoryPage::new(images, EmptyMessage::Images);
            if let Some(query) = query {
                page.set_query(query.as_str());
            }
            emit(&page, None, ctx, flags)
        }
    }
}

async fn businesses(args: &BusinessGridArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let category = args.category.as_deref().map(Selector::parse).unwrap_or_default();
    let business_type = args
        .business_type
        .as_deref()
        .map(Selector::parse)
        .unwrap_or_default();

    let tree = ctx.service.category_tree().await?;
    check_selection(&tree, &category, &business_type)?;

    let listings = ctx.service.business_listings(!args.include_unverified).await?;
    let policy = args.policy.map_or(ctx.config.directory.policy, Into::into);

    let state = FilterState {
        query: args.query.clone().unwrap_or_default(),
        category,
        business_type,
    };
    if query_is_overridden(policy, &state) {
        tracing::warn!(
            query = %state.query,
            "query ignored: a category selection replaces it under latest-wins; pass --policy conjunctive to combine them"
        );
    }

    let mut page = DirectoryPage::new(listings, EmptyMessage::Businesses).with_policy(policy);
    page.apply(state);
    emit(&page, None, ctx, flags)
}

/// Under `LatestWins` the last reducer to run decides the visible set, and
/// `apply` runs the selections after the query.
fn query_is_overridden(policy: CompositionPolicy, state: &FilterState) -> bool {
    policy == CompositionPolicy::LatestWins
        && !state.query.trim().is_empty()
        && !state.category.is_all()
}

/// Reject selections that no page could produce.
fn check_selection(tree: &CategoryTree, category: &Selector, business_type: &Selector) -> Result<(), CoreError> {
    match (category, business_type) {
        (Selector::All, Selector::All) => Ok(()),
        (Selector::All, Selector::Slug(_)) => Err(CoreError::BadRequest(
            "a type can only be selected within a category".into(),
        )),
        (Selector::Slug(category), Selector::All) => tree
            .find_category(category)
            .map(|_| ())
            .ok_or_else(|| CoreError::not_found("category", category.as_str())),
        (Selector::Slug(category), Selector::Slug(business_type)) => {
            if tree.find_category(category).is_none() {
                return Err(CoreError::not_found("category", category.as_str()));
            }
            tree.find_type(category, business_type)
                .map(|_| ())
                .ok_or_else(|| CoreError::not_found("type", format!("{category}/{business_type}")))
        }
    }
}

fn emit<T>(page: &DirectoryPage<T>, extra: Option<T>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()>
where
    T: Listing + Clone + Serialize,
{
    let response = DirectoryResponse {
        state: page.state().clone(),
        policy: page.policy(),
        total: page.snapshot().len(),
        visible: page.visible().len(),
        view: page.render(ctx.row_sizes, extra),
    };

    if flags.format != OutputFormat::Table {
        return output(&response, flags.format);
    }

    match &response.view {
        DirectoryView::Grid { rows } => {
            let labels = rows
                .iter()
                .map(|row| row.iter().map(tile_label).collect())
                .collect::<Vec<Vec<String>>>();
            output_text(&render_grid(&labels));
        }
        DirectoryView::Empty { message } => output_text(message),
    }
    Ok(())
}

fn tile_label<T: Listing>(item: &T) -> String {
    let name = item.name();
    if name.is_empty() {
        String::from("(untitled)")
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use chamber_core::entities::{BusinessCategory, BusinessType, CategoryWithTypes};
    use chrono::Utc;

    use super::*;

    fn tree() -> CategoryTree {
        let now = Utc::now();
        CategoryTree::new(vec![CategoryWithTypes {
            category: BusinessCategory {
                id: "cat-1".into(),
                name: "Retail".into(),
                slug: "retail".into(),
                created_at: now,
            },
            types: vec![BusinessType {
                id: "typ-1".into(),
                category_id: "cat-1".into(),
                name: "Grocery".into(),
                slug: "grocery".into(),
                created_at: now,
            }],
        }])
    }

    #[test]
    fn known_selections_pass() {
        let tree = tree();
        assert!(check_selection(&tree, &Selector::All, &Selector::All).is_ok());
        assert!(check_selection(&tree, &Selector::parse("retail"), &Selector::All).is_ok());
        assert!(check_selection(&tree, &Selector::parse("retail"), &Selector::parse("grocery")).is_ok());
    }

    #[test]
    fn type_without_category_is_bad_request() {
        let err = check_selection(&tree(), &Selector::All, &Selector::parse("grocery")).unwrap_err();
        assert_eq!(err.status(), 400);
    }

    #[test]
    fn unknown_slugs_are_not_found() {
        let tree = tree();
        let err = check_selection(&tree, &Selector::parse("services"), &Selector::All).unwrap_err();
        assert_eq!(err.status(), 404);
        let err = check_selection(&tree, &Selector::parse("retail"), &Selector::parse("legal")).unwrap_err();
        assert_eq!(err.status(), 404);
        assert!(err.to_string().contains("retail/legal"));
    }

    #[test]
    fn latest_wins_flags_query_with_category() {
        let state = FilterState {
            query: "acme".into(),
            category: Selector::parse("retail"),
            business_type: Selector::All,
        };
        assert!(query_is_overridden(CompositionPolicy::LatestWins, &state));
        assert!(!query_is_overridden(CompositionPolicy::Conjunctive, &state));

        let query_only = FilterState {
            category: Selector::All,
            ..state.clone()
        };
        assert!(!query_is_overridden(CompositionPolicy::LatestWins, &query_only));

        let blank = FilterState {
            query: "  ".into(),
            ..state
        };
        assert!(!query_is_overridden(CompositionPolicy::LatestWins, &blank));
    }

    #[test]
    fn untitled_tiles_get_a_placeholder() {
        let item = DirectoryItem {
            id: "x".into(),
            name: String::new(),
            slug: String::new(),
            href: String::new(),
        };
        assert_eq!(tile_label(&item), "(untitled)");
        assert_eq!(tile_label(&DirectoryItem::all_tile()), "All");
    }
}
