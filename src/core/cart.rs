//! Cart business logic - A customer's staging area before checkout.
//!
//! Carts are exclusively owned: every operation here is scoped to the
//! caller's own lines and is gated to customers. The price of a line is
//! computed server-side from the menu when the line is added; callers
//! never supply prices. Adding the same dish twice appends a second line.

use crate::{
    core::{
        menu,
        policy::{self, Action},
        roles::Principal,
    },
    entities::{CartItem, cart_item},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Lists the caller's cart lines in the order they were added.
pub async fn get_cart(
    db: &DatabaseConnection,
    principal: &Principal,
) -> Result<Vec<cart_item::Model>> {
    policy::authorize(principal, Action::ManageOwnCart)?;

    CartItem::find()
        .filter(cart_item::Column::UserId.eq(principal.id))
        .order_by_asc(cart_item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Appends a line to the caller's cart, snapshotting the current menu
/// price.
pub async fn add_to_cart(
    db: &DatabaseConnection,
    principal: &Principal,
    menu_item_id: i64,
    quantity: i32,
) -> Result<cart_item::Model> {
    policy::authorize(principal, Action::ManageOwnCart)?;

    if quantity < 1 {
        return Err(Error::InvalidQuantity { quantity });
    }

    // Rejects unknown and soft-deleted items alike
    let item = menu::get_menu_item(db, menu_item_id).await?;

    let unit_price = item.price;
    let line = cart_item::ActiveModel {
        user_id: Set(principal.id),
        menu_item_id: Set(item.id),
        quantity: Set(quantity),
        unit_price: Set(unit_price),
        price: Set(unit_price * Decimal::from(quantity)),
        added_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(
        "Cart line added: {}x '{}' for user {}",
        quantity, item.title, principal.username
    );
    Ok(line)
}

/// Removes every line from the caller's cart and reports how many went.
///
/// Clearing an already empty cart succeeds with a count of zero; the
/// desired end state holds either way.
pub async fn clear_cart(db: &DatabaseConnection, principal: &Principal) -> Result<u64> {
    policy::authorize(principal, Action::ManageOwnCart)?;

    let deleted = CartItem::delete_many()
        .filter(cart_item::Column::UserId.eq(principal.id))
        .exec(db)
        .await?;

    info!(
        "Cart cleared for user {}: {} lines removed",
        principal.username, deleted.rows_affected
    );
    Ok(deleted.rows_affected)
}
