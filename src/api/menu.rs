//! Menu endpoints - public browsing plus manager-side curation.

use crate::{
    api::ApiContext,
    core::{
        menu::{self, MenuItemFilter, MenuItemPatch, NewMenuItem},
        roles::resolve_principal,
    },
    entities::menu_item,
    errors::Result,
};
use sea_orm::prelude::Decimal;
use serde::Deserialize;

/// Query parameters accepted by the menu listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuItemListQuery {
    /// Keep items in the category with this title
    pub category: Option<String>,
    /// Keep items priced at or below this bound
    pub max_price: Option<Decimal>,
    /// Keep items whose title starts with this prefix
    pub search: Option<String>,
    /// Ordering spec, e.g. `"price,-title"`
    pub ordering: Option<String>,
    /// 1-based page number, defaults to 1
    pub page: Option<u64>,
    /// Page size, defaults to the configured page size
    pub per_page: Option<u64>,
}

/// Payload for creating a menu item.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMenuItemRequest {
    /// Display name of the dish
    pub title: String,
    /// Price per unit
    pub price: Decimal,
    /// Whether the item is featured
    #[serde(default)]
    pub featured: bool,
    /// Category the item belongs to
    pub category_id: i64,
}

/// Payload for partially updating a menu item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMenuItemRequest {
    /// New display name
    pub title: Option<String>,
    /// New price per unit
    pub price: Option<Decimal>,
    /// New featured flag
    pub featured: Option<bool>,
    /// New category
    pub category_id: Option<i64>,
}

/// Lists menu items; open to unauthenticated callers.
pub async fn list_menu_items(
    ctx: &ApiContext,
    query: MenuItemListQuery,
) -> Result<Vec<menu_item::Model>> {
    let page = super::resolve_page(ctx, query.page, query.per_page)?;
    let filter = MenuItemFilter {
        category: query.category,
        max_price: query.max_price,
        search: query.search,
        ordering: query.ordering,
    };
    menu::list_menu_items(&ctx.database, &filter, page).await
}

/// Retrieves one menu item; open to unauthenticated callers.
pub async fn get_menu_item(ctx: &ApiContext, item_id: i64) -> Result<menu_item::Model> {
    menu::get_menu_item(&ctx.database, item_id).await
}

/// Creates a menu item on behalf of the acting manager.
pub async fn create_menu_item(
    ctx: &ApiContext,
    actor_id: i64,
    request: CreateMenuItemRequest,
) -> Result<menu_item::Model> {
    let principal = resolve_principal(&ctx.database, actor_id).await?;
    let new_item = NewMenuItem {
        title: request.title,
        price: request.price,
        featured: request.featured,
        category_id: request.category_id,
    };
    menu::create_menu_item(&ctx.database, &principal, new_item).await
}

/// Applies a partial update to a menu item.
pub async fn update_menu_item(
    ctx: &ApiContext,
    actor_id: i64,
    item_id: i64,
    request: UpdateMenuItemRequest,
) -> Result<menu_item::Model> {
    let principal = resolve_principal(&ctx.database, actor_id).await?;
    let patch = MenuItemPatch {
        title: request.title,
        price: request.price,
        featured: request.featured,
        category_id: request.category_id,
    };
    menu::update_menu_item(&ctx.database, &principal, item_id, patch).await
}

/// Removes a menu item from the menu, keeping order history intact.
pub async fn delete_menu_item(ctx: &ApiContext, actor_id: i64, item_id: i64) -> Result<()> {
    let principal = resolve_principal(&ctx.database, actor_id).await?;
    menu::delete_menu_item(&ctx.database, &principal, item_id).await
}
