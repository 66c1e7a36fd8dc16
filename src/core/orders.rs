//! Order lifecycle - Checkout, crew assignment, and delivery progress.
//!
//! An order is born at checkout as an atomic conversion of the caller's
//! cart and then moves through `pending -> assigned -> delivered`, with
//! one allowed regression: a mistaken delivery can be pushed back to
//! `assigned`. Nothing returns to `pending` once crew is attached, and a
//! pending order never jumps straight to `delivered`. The order total is
//! computed once, from the lines created at checkout; no operation edits
//! lines afterwards, so the total is never recomputed.

use crate::{
    core::{
        policy::{self, Action},
        roles::{self, Principal, Role},
    },
    entities::{
        CartItem, Order, OrderItem, OrderStatus, StaffGroup, User, cart_item, order, order_item,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

/// A freshly placed order together with its lines.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderReceipt {
    /// The created order
    pub order: order::Model,
    /// Its lines, in cart order
    pub items: Vec<order_item::Model>,
}

/// Checks a status move against the lifecycle table.
fn ensure_transition(order: i64, from: OrderStatus, to: OrderStatus) -> Result<()> {
    let allowed = matches!(
        (from, to),
        (
            OrderStatus::Pending,
            OrderStatus::Pending | OrderStatus::Assigned
        ) | (
            OrderStatus::Assigned,
            OrderStatus::Assigned | OrderStatus::Delivered
        ) | (
            OrderStatus::Delivered,
            OrderStatus::Delivered | OrderStatus::Assigned
        )
    );
    if allowed {
        Ok(())
    } else {
        Err(Error::InvalidTransition { order, from, to })
    }
}

/// Deletes exactly the cart lines read at the start of a checkout.
///
/// The row count guards against a concurrent checkout of the same cart:
/// if another conversion consumed any of these lines first, the count
/// comes up short and the whole checkout rolls back.
async fn consume_cart_lines<C: ConnectionTrait>(conn: &C, line_ids: &[i64]) -> Result<()> {
    let deleted = CartItem::delete_many()
        .filter(cart_item::Column::Id.is_in(line_ids.iter().copied()))
        .exec(conn)
        .await?;
    if deleted.rows_affected != line_ids.len() as u64 {
        return Err(Error::CheckoutConflict);
    }
    Ok(())
}

/// Converts the caller's cart into a pending order, atomically.
///
/// The cart must be non-empty. Every line is copied into an order line
/// with its snapshotted prices, the order total is set to the sum of the
/// created lines, and the consumed cart lines are removed. On any failure
/// the transaction rolls back and the cart is left exactly as it was.
pub async fn checkout(db: &DatabaseConnection, principal: &Principal) -> Result<OrderReceipt> {
    policy::authorize(principal, Action::CreateOrder)?;

    let txn = db.begin().await?;

    let cart_lines = CartItem::find()
        .filter(cart_item::Column::UserId.eq(principal.id))
        .order_by_asc(cart_item::Column::Id)
        .all(&txn)
        .await?;
    if cart_lines.is_empty() {
        return Err(Error::EmptyCart);
    }

    let placed = order::ActiveModel {
        user_id: Set(principal.id),
        delivery_crew_id: Set(None),
        status: Set(OrderStatus::Pending),
        total: Set(Decimal::ZERO),
        placed_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let mut items = Vec::with_capacity(cart_lines.len());
    for line in &cart_lines {
        let item = order_item::ActiveModel {
            order_id: Set(placed.id),
            menu_item_id: Set(line.menu_item_id),
            quantity: Set(line.quantity),
            unit_price: Set(line.unit_price),
            price: Set(line.price),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        items.push(item);
    }

    // The total comes from the lines actually written, not the cart read
    let total: Decimal = items.iter().map(|item| item.price).sum();
    let mut active: order::ActiveModel = placed.into();
    active.total = Set(total);
    let placed = active.update(&txn).await?;

    let line_ids: Vec<i64> = cart_lines.iter().map(|line| line.id).collect();
    consume_cart_lines(&txn, &line_ids).await?;

    txn.commit().await?;

    info!(
        "Order {} placed by {} for {}",
        placed.id, principal.username, placed.total
    );
    Ok(OrderReceipt {
        order: placed,
        items,
    })
}

/// Assigns delivery crew to an order, optionally moving its status.
///
/// The target user must currently hold delivery-crew membership. With the
/// status omitted, a pending or assigned order becomes `assigned` and a
/// delivered one stays `delivered`. An explicit `pending` is rejected
/// outright; an order with crew attached is never pending.
pub async fn assign_delivery_crew(
    db: &DatabaseConnection,
    principal: &Principal,
    order_id: i64,
    crew_user_id: i64,
    status: Option<OrderStatus>,
) -> Result<order::Model> {
    policy::authorize(principal, Action::AssignDeliveryCrew)?;

    let txn = db.begin().await?;

    let order = Order::find_by_id(order_id)
        .one(&txn)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;

    let crew_user = User::find_by_id(crew_user_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::DeliveryCrewNotFound {
            user: crew_user_id.to_string(),
        })?;
    if !roles::holds_group(&txn, crew_user.id, StaffGroup::DeliveryCrew).await? {
        return Err(Error::DeliveryCrewNotFound {
            user: crew_user.username,
        });
    }

    let next = match status {
        Some(OrderStatus::Pending) => return Err(Error::PendingWithCrew),
        Some(next) => next,
        None if order.status == OrderStatus::Delivered => OrderStatus::Delivered,
        None => OrderStatus::Assigned,
    };
    ensure_transition(order.id, order.status, next)?;

    let mut active: order::ActiveModel = order.into();
    active.delivery_crew_id = Set(Some(crew_user.id));
    active.status = Set(next);
    let updated = active.update(&txn).await?;

    txn.commit().await?;

    info!(
        "Order {} assigned to {} by {}, status {}",
        updated.id, crew_user.username, principal.username, updated.status
    );
    Ok(updated)
}

/// Moves the status of an order assigned to the calling crew member.
///
/// Orders not assigned to the caller are reported as missing, never as
/// belonging to someone else. Crew cannot hand an order back to
/// `pending`, and they cannot touch the crew assignment itself.
pub async fn update_status(
    db: &DatabaseConnection,
    principal: &Principal,
    order_id: i64,
    status: OrderStatus,
) -> Result<order::Model> {
    policy::authorize(principal, Action::UpdateOrderStatus)?;

    let txn = db.begin().await?;

    let order = Order::find_by_id(order_id)
        .filter(order::Column::DeliveryCrewId.eq(principal.id))
        .one(&txn)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;

    if status == OrderStatus::Pending {
        return Err(Error::PendingWithCrew);
    }
    ensure_transition(order.id, order.status, status)?;

    let mut active: order::ActiveModel = order.into();
    active.status = Set(status);
    let updated = active.update(&txn).await?;

    txn.commit().await?;

    info!(
        "Order {} moved to {} by {}",
        updated.id, updated.status, principal.username
    );
    Ok(updated)
}

/// Retrieves one order, scoped to what the caller may see.
///
/// Customers reading someone else's order get an ownership denial, which
/// is deliberately distinct from the not-found reported to crew members;
/// a courier learns nothing about orders outside their round.
pub async fn get_order(
    db: &DatabaseConnection,
    principal: &Principal,
    order_id: i64,
) -> Result<order::Model> {
    let order = Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;

    let is_owner = order.user_id == principal.id;
    let is_assigned_crew = order.delivery_crew_id == Some(principal.id);
    if policy::can_read_order(principal.role, is_owner, is_assigned_crew) {
        Ok(order)
    } else if principal.role == Role::DeliveryCrew {
        Err(Error::OrderNotFound { id: order_id })
    } else {
        Err(Error::OrderNotOwned { id: order_id })
    }
}

/// Removes an order and its lines in one transaction.
pub async fn delete_order(
    db: &DatabaseConnection,
    principal: &Principal,
    order_id: i64,
) -> Result<()> {
    policy::authorize(principal, Action::DeleteOrder)?;

    let txn = db.begin().await?;

    let order = Order::find_by_id(order_id)
        .one(&txn)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;

    OrderItem::delete_many()
        .filter(order_item::Column::OrderId.eq(order.id))
        .exec(&txn)
        .await?;
    order.delete(&txn).await?;

    txn.commit().await?;

    info!("Order {} deleted by {}", order_id, principal.username);
    Ok(())
}
