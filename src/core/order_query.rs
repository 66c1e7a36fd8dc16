//! Order listings - Role-scoped views over placed orders.
//!
//! Each role gets a different window: customers see the orders they
//! placed, managers see everything with filtering and pagination, and
//! delivery crew see the order lines of their own round. The crew view
//! deliberately returns lines rather than orders; couriers work from an
//! item manifest, and downstream consumers depend on that shape.

use crate::{
    core::{
        listing::{Page, parse_ordering},
        policy::{self, Action},
        roles::{Principal, Role},
    },
    entities::{Order, OrderItem, order, order_item},
    errors::Result,
};
use sea_orm::{QueryOrder, prelude::*};
use serde::Serialize;

/// Sortable fields a manager or customer listing exposes.
const ORDERING_FIELDS: &[(&str, order::Column)] = &[
    ("id", order::Column::Id),
    ("placed_at", order::Column::PlacedAt),
    ("total", order::Column::Total),
    ("status", order::Column::Status),
    ("user_id", order::Column::UserId),
];

/// Optional narrowing for an order listing.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Keep orders placed by this user; honored for managers only
    pub user: Option<i64>,
    /// Ordering spec, e.g. `"-placed_at,total"`
    pub ordering: Option<String>,
}

/// What a listing returns, depending on who asked.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OrderListing {
    /// Whole orders, for customers and managers
    Orders(Vec<order::Model>),
    /// Order lines, for delivery crew
    Items(Vec<order_item::Model>),
}

impl OrderListing {
    /// The orders page, if this listing carries orders.
    #[must_use]
    pub fn into_orders(self) -> Option<Vec<order::Model>> {
        match self {
            Self::Orders(orders) => Some(orders),
            Self::Items(_) => None,
        }
    }

    /// The order lines, if this listing carries lines.
    #[must_use]
    pub fn into_items(self) -> Option<Vec<order_item::Model>> {
        match self {
            Self::Items(items) => Some(items),
            Self::Orders(_) => None,
        }
    }
}

/// Lists orders as the caller's role allows.
///
/// Managers page through everything, newest first unless the filter says
/// otherwise; a page past the end is an empty list, not an error. The
/// `user` filter and the page window apply to the manager view only.
pub async fn list_orders(
    db: &DatabaseConnection,
    principal: &Principal,
    filter: &OrderFilter,
    page: Page,
) -> Result<OrderListing> {
    match principal.role {
        Role::Manager | Role::Admin => {
            policy::authorize(principal, Action::ViewAllOrders)?;

            let mut query = Order::find();
            if let Some(user_id) = filter.user {
                query = query.filter(order::Column::UserId.eq(user_id));
            }
            query = apply_ordering(query, filter.ordering.as_deref())?;

            if page.offset().is_none() {
                return Ok(OrderListing::Orders(Vec::new()));
            }

            let orders = query.paginate(db, page.size).fetch_page(page.index()).await?;
            Ok(OrderListing::Orders(orders))
        }
        Role::Customer => {
            policy::authorize(principal, Action::ViewOwnOrders)?;

            let query = Order::find().filter(order::Column::UserId.eq(principal.id));
            let query = apply_ordering(query, filter.ordering.as_deref())?;

            let orders = query.all(db).await?;
            Ok(OrderListing::Orders(orders))
        }
        Role::DeliveryCrew => {
            policy::authorize(principal, Action::ViewAssignedOrders)?;

            let assigned = Order::find()
                .filter(order::Column::DeliveryCrewId.eq(principal.id))
                .all(db)
                .await?;
            let order_ids: Vec<i64> = assigned.iter().map(|assigned_order| assigned_order.id).collect();

            let items = OrderItem::find()
                .filter(order_item::Column::OrderId.is_in(order_ids))
                .all(db)
                .await?;
            Ok(OrderListing::Items(items))
        }
    }
}

fn apply_ordering(
    query: sea_orm::Select<Order>,
    ordering: Option<&str>,
) -> Result<sea_orm::Select<Order>> {
    let mut query = query;
    match ordering {
        Some(spec) => {
            for (column, direction) in parse_ordering(spec, ORDERING_FIELDS)? {
                query = query.order_by(column, direction);
            }
        }
        None => query = query.order_by_desc(order::Column::PlacedAt),
    }
    Ok(query)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::{cart, orders, roles::resolve_principal};
    use crate::entities::StaffGroup;
    use crate::test_utils::*;

    /// Places one order for a fresh user and returns both.
    async fn place_order(
        db: &DatabaseConnection,
        category_id: i64,
        username: &str,
        price: &str,
        quantity: i32,
    ) -> Result<(Principal, order::Model)> {
        let user = create_test_user(db, username).await?;
        let principal = resolve_principal(db, user.id).await?;
        let item = create_test_menu_item(db, "Dish", price, category_id).await?;
        cart::add_to_cart(db, &principal, item.id, quantity).await?;
        let receipt = orders::checkout(db, &principal).await?;
        Ok((principal, receipt.order))
    }

    #[tokio::test]
    async fn test_customer_sees_only_their_orders() -> Result<()> {
        let (db, category) = setup_with_category().await?;
        let (alice, alice_order) = place_order(&db, category.id, "alice", "5.00", 1).await?;
        place_order(&db, category.id, "bob", "7.00", 1).await?;

        let listing =
            list_orders(&db, &alice, &OrderFilter::default(), Page::new(1, 10)?).await?;
        let orders = listing.into_orders().unwrap();

        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id, alice_order.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_orders_come_newest_first() -> Result<()> {
        let (db, category) = setup_with_category().await?;
        let (alice, first) = place_order(&db, category.id, "alice", "5.00", 1).await?;

        let second_item = create_test_menu_item(&db, "Second Dish", "3.00", category.id).await?;
        cart::add_to_cart(&db, &alice, second_item.id, 1).await?;
        let second = orders::checkout(&db, &alice).await?.order;

        let listing =
            list_orders(&db, &alice, &OrderFilter::default(), Page::new(1, 10)?).await?;
        let orders = listing.into_orders().unwrap();

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, second.id);
        assert_eq!(orders[1].id, first.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_manager_pages_through_everything() -> Result<()> {
        let (db, category) = setup_with_category().await?;
        place_order(&db, category.id, "c1", "5.00", 1).await?;
        place_order(&db, category.id, "c2", "6.00", 1).await?;
        place_order(&db, category.id, "c3", "7.00", 1).await?;
        let manager = test_principal(900, Role::Manager);

        let filter = OrderFilter {
            ordering: Some("id".to_string()),
            ..Default::default()
        };
        let first_page = list_orders(&db, &manager, &filter, Page::new(1, 2)?)
            .await?
            .into_orders()
            .unwrap();
        assert_eq!(first_page.len(), 2);

        let second_page = list_orders(&db, &manager, &filter, Page::new(2, 2)?)
            .await?
            .into_orders()
            .unwrap();
        assert_eq!(second_page.len(), 1);

        // A page far past the end is empty, not an error
        let far_page = list_orders(&db, &manager, &filter, Page::new(50, 2)?)
            .await?
            .into_orders()
            .unwrap();
        assert!(far_page.is_empty());

        // So is the largest window a caller can ask for
        let distant_page = list_orders(&db, &manager, &filter, Page::new(u64::MAX, 2)?)
            .await?
            .into_orders()
            .unwrap();
        assert!(distant_page.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_manager_filters_by_customer_and_total() -> Result<()> {
        let (db, category) = setup_with_category().await?;
        let (_, cheap) = place_order(&db, category.id, "c1", "5.00", 1).await?;
        let (bob, pricey) = place_order(&db, category.id, "c2", "9.00", 2).await?;
        let manager = test_principal(900, Role::Manager);

        let filter = OrderFilter {
            user: Some(bob.id),
            ..Default::default()
        };
        let only_bobs = list_orders(&db, &manager, &filter, Page::new(1, 10)?)
            .await?
            .into_orders()
            .unwrap();
        assert_eq!(only_bobs.len(), 1);
        assert_eq!(only_bobs[0].id, pricey.id);

        let filter = OrderFilter {
            ordering: Some("-total".to_string()),
            ..Default::default()
        };
        let by_total = list_orders(&db, &manager, &filter, Page::new(1, 10)?)
            .await?
            .into_orders()
            .unwrap();
        assert_eq!(by_total[0].id, pricey.id);
        assert_eq!(by_total[1].id, cheap.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_manager_rejects_unknown_ordering_field() -> Result<()> {
        let db = setup_test_db().await?;
        let manager = test_principal(900, Role::Manager);

        let filter = OrderFilter {
            ordering: Some("delivery_secret".to_string()),
            ..Default::default()
        };
        let result = list_orders(&db, &manager, &filter, Page::new(1, 2)?).await;
        assert!(matches!(
            result.unwrap_err(),
            crate::errors::Error::UnknownOrderingField { .. }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_crew_listing_is_an_item_manifest() -> Result<()> {
        let (db, category) = setup_with_category().await?;
        let (_, assigned_order) = place_order(&db, category.id, "c1", "5.00", 2).await?;
        place_order(&db, category.id, "c2", "6.00", 1).await?;

        let manager = test_principal(900, Role::Manager);
        let courier = create_test_staff(&db, "dan", StaffGroup::DeliveryCrew).await?;
        orders::assign_delivery_crew(&db, &manager, assigned_order.id, courier.id, None).await?;

        let courier_principal = resolve_principal(&db, courier.id).await?;
        let listing = list_orders(
            &db,
            &courier_principal,
            &OrderFilter::default(),
            Page::new(1, 10)?,
        )
        .await?;
        let items = listing.into_items().unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].order_id, assigned_order.id);
        assert_eq!(items[0].quantity, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_crew_with_no_round_sees_nothing() -> Result<()> {
        let (db, category) = setup_with_category().await?;
        place_order(&db, category.id, "c1", "5.00", 1).await?;

        let courier = create_test_staff(&db, "dan", StaffGroup::DeliveryCrew).await?;
        let courier_principal = resolve_principal(&db, courier.id).await?;

        let listing = list_orders(
            &db,
            &courier_principal,
            &OrderFilter::default(),
            Page::new(1, 10)?,
        )
        .await?;
        assert!(listing.into_items().unwrap().is_empty());

        Ok(())
    }
}
