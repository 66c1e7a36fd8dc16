//! Menu business logic - Browsing and managing the dishes on offer.
//!
//! Listing and single-item reads are open to everyone, including
//! unauthenticated browsers. Mutations are manager-only and validated
//! before anything is written. Items are soft deleted so cart and order
//! lines created earlier keep a valid reference; every read in this
//! module filters deleted items out.

use crate::{
    core::{
        listing::{Page, parse_ordering},
        policy::{self, Action},
        roles::Principal,
    },
    entities::{Category, MenuItem, category, menu_item},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Sortable fields a menu listing exposes.
const ORDERING_FIELDS: &[(&str, menu_item::Column)] = &[
    ("id", menu_item::Column::Id),
    ("title", menu_item::Column::Title),
    ("price", menu_item::Column::Price),
    ("featured", menu_item::Column::Featured),
    ("category_id", menu_item::Column::CategoryId),
];

/// Optional narrowing applied to a menu listing. Filters combine; each
/// one left as `None` is simply not applied.
#[derive(Debug, Clone, Default)]
pub struct MenuItemFilter {
    /// Keep items whose category has exactly this title
    pub category: Option<String>,
    /// Keep items priced at or below this bound
    pub max_price: Option<Decimal>,
    /// Keep items whose title starts with this prefix
    pub search: Option<String>,
    /// Ordering spec, e.g. `"price,-title"`
    pub ordering: Option<String>,
}

/// Fields for a new menu item.
#[derive(Debug, Clone)]
pub struct NewMenuItem {
    /// Display name, must not be blank
    pub title: String,
    /// Price per unit, must be positive
    pub price: Decimal,
    /// Whether the item is featured
    pub featured: bool,
    /// Category the item belongs to
    pub category_id: i64,
}

/// Partial update for an existing menu item. `None` fields keep their
/// current value.
#[derive(Debug, Clone, Default)]
pub struct MenuItemPatch {
    /// New display name
    pub title: Option<String>,
    /// New price per unit
    pub price: Option<Decimal>,
    /// New featured flag
    pub featured: Option<bool>,
    /// New category
    pub category_id: Option<i64>,
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::BlankTitle);
    }
    Ok(())
}

fn validate_price(price: Decimal) -> Result<()> {
    if price <= Decimal::ZERO {
        return Err(Error::InvalidPrice { price });
    }
    Ok(())
}

/// Lists menu items matching the filter, one page at a time.
///
/// A category title with no matching category yields an empty page rather
/// than an error; the filter asked for a set nothing belongs to. Results
/// default to ID order so pages stay stable between requests.
pub async fn list_menu_items(
    db: &DatabaseConnection,
    filter: &MenuItemFilter,
    page: Page,
) -> Result<Vec<menu_item::Model>> {
    let mut query = MenuItem::find().filter(menu_item::Column::IsDeleted.eq(false));

    if let Some(category_title) = &filter.category {
        let category = Category::find()
            .filter(category::Column::Title.eq(category_title.as_str()))
            .one(db)
            .await?;
        match category {
            Some(category) => {
                query = query.filter(menu_item::Column::CategoryId.eq(category.id));
            }
            None => return Ok(Vec::new()),
        }
    }

    if let Some(max_price) = filter.max_price {
        query = query.filter(menu_item::Column::Price.lte(max_price));
    }

    if let Some(prefix) = &filter.search {
        query = query.filter(menu_item::Column::Title.starts_with(prefix.as_str()));
    }

    match &filter.ordering {
        Some(spec) => {
            for (column, direction) in parse_ordering(spec, ORDERING_FIELDS)? {
                query = query.order_by(column, direction);
            }
        }
        None => query = query.order_by_asc(menu_item::Column::Id),
    }

    // A window whose row offset overflows a u64 is past the end of any table.
    if page.offset().is_none() {
        return Ok(Vec::new());
    }

    query
        .paginate(db, page.size)
        .fetch_page(page.index())
        .await
        .map_err(Into::into)
}

/// Retrieves a single menu item by ID, hiding soft-deleted ones.
pub async fn get_menu_item(db: &DatabaseConnection, item_id: i64) -> Result<menu_item::Model> {
    let item = MenuItem::find_by_id(item_id)
        .one(db)
        .await?
        .ok_or(Error::MenuItemNotFound { id: item_id })?;

    if item.is_deleted {
        return Err(Error::MenuItemNotFound { id: item_id });
    }

    Ok(item)
}

/// Creates a menu item after validating its fields and category.
pub async fn create_menu_item(
    db: &DatabaseConnection,
    principal: &Principal,
    new_item: NewMenuItem,
) -> Result<menu_item::Model> {
    policy::authorize(principal, Action::MutateMenu)?;
    validate_title(&new_item.title)?;
    validate_price(new_item.price)?;

    Category::find_by_id(new_item.category_id)
        .one(db)
        .await?
        .ok_or(Error::CategoryNotFound {
            id: new_item.category_id,
        })?;

    let now = chrono::Utc::now().naive_utc();
    let created = menu_item::ActiveModel {
        title: Set(new_item.title),
        price: Set(new_item.price),
        featured: Set(new_item.featured),
        category_id: Set(new_item.category_id),
        is_deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(
        "Menu item '{}' (id {}) created by {}",
        created.title, created.id, principal.username
    );
    Ok(created)
}

/// Applies a partial update to a menu item.
///
/// Snapshots taken by existing cart and order lines are untouched; only
/// future adds see the new price.
pub async fn update_menu_item(
    db: &DatabaseConnection,
    principal: &Principal,
    item_id: i64,
    patch: MenuItemPatch,
) -> Result<menu_item::Model> {
    policy::authorize(principal, Action::MutateMenu)?;

    let item = get_menu_item(db, item_id).await?;

    if let Some(title) = &patch.title {
        validate_title(title)?;
    }
    if let Some(price) = patch.price {
        validate_price(price)?;
    }
    if let Some(category_id) = patch.category_id {
        Category::find_by_id(category_id)
            .one(db)
            .await?
            .ok_or(Error::CategoryNotFound { id: category_id })?;
    }

    let mut active: menu_item::ActiveModel = item.into();
    if let Some(title) = patch.title {
        active.title = Set(title);
    }
    if let Some(price) = patch.price {
        active.price = Set(price);
    }
    if let Some(featured) = patch.featured {
        active.featured = Set(featured);
    }
    if let Some(category_id) = patch.category_id {
        active.category_id = Set(category_id);
    }
    active.updated_at = Set(chrono::Utc::now().naive_utc());

    let updated = active.update(db).await?;
    info!(
        "Menu item '{}' (id {}) updated by {}",
        updated.title, updated.id, principal.username
    );
    Ok(updated)
}

/// Soft deletes a menu item so existing order history keeps its
/// reference.
pub async fn delete_menu_item(
    db: &DatabaseConnection,
    principal: &Principal,
    item_id: i64,
) -> Result<()> {
    policy::authorize(principal, Action::MutateMenu)?;

    let item = get_menu_item(db, item_id).await?;
    let title = item.title.clone();

    let mut active: menu_item::ActiveModel = item.into();
    active.is_deleted = Set(true);
    active.updated_at = Set(chrono::Utc::now().naive_utc());
    active.update(db).await?;

    info!(
        "Menu item '{}' (id {}) deleted by {}",
        title, item_id, principal.username
    );
    Ok(())
}
