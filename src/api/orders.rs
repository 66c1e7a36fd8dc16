//! Order endpoints - checkout, listings, and the shared update route.
//!
//! The update route is one endpoint serving two staff roles: managers
//! send a crew assignment (with an optional status), couriers send a
//! status alone. The payload decides nothing; the caller's role does.

use crate::{
    api::ApiContext,
    core::{
        order_query::{self, OrderFilter, OrderListing},
        orders::{self, OrderReceipt},
        policy::Action,
        roles::{Role, resolve_principal},
    },
    entities::{OrderStatus, order},
    errors::{Error, Result},
};
use serde::Deserialize;

/// Query parameters accepted by the order listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderListQuery {
    /// Keep orders placed by this user; managers only
    pub user: Option<i64>,
    /// Ordering spec, e.g. `"-placed_at,total"`
    pub ordering: Option<String>,
    /// 1-based page number; managers only
    pub page: Option<u64>,
    /// Page size; managers only
    pub per_page: Option<u64>,
}

/// Payload for the order update route.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderUpdateRequest {
    /// User to put on delivery; managers only
    pub delivery_crew: Option<i64>,
    /// Status to move the order to
    pub status: Option<OrderStatus>,
}

/// Lists orders as the caller's role allows.
pub async fn list_orders(
    ctx: &ApiContext,
    actor_id: i64,
    query: OrderListQuery,
) -> Result<OrderListing> {
    let principal = resolve_principal(&ctx.database, actor_id).await?;
    let filter = OrderFilter {
        user: query.user,
        ordering: query.ordering,
    };
    let page = super::resolve_page(ctx, query.page, query.per_page)?;
    order_query::list_orders(&ctx.database, &principal, &filter, page).await
}

/// Converts the caller's cart into a pending order.
pub async fn checkout(ctx: &ApiContext, actor_id: i64) -> Result<OrderReceipt> {
    let principal = resolve_principal(&ctx.database, actor_id).await?;
    orders::checkout(&ctx.database, &principal).await
}

/// Retrieves one order, scoped to what the caller may see.
pub async fn get_order(ctx: &ApiContext, actor_id: i64, order_id: i64) -> Result<order::Model> {
    let principal = resolve_principal(&ctx.database, actor_id).await?;
    orders::get_order(&ctx.database, &principal, order_id).await
}

/// Applies an update to an order, dispatching on the caller's role.
///
/// Managers must name the delivery crew and may carry a status along;
/// couriers must name a status and may not touch the crew assignment.
/// Customers cannot update orders at all.
pub async fn update_order(
    ctx: &ApiContext,
    actor_id: i64,
    order_id: i64,
    request: OrderUpdateRequest,
) -> Result<order::Model> {
    let principal = resolve_principal(&ctx.database, actor_id).await?;
    match principal.role {
        Role::Manager | Role::Admin => {
            let crew_user_id = request.delivery_crew.ok_or(Error::MissingDeliveryCrew)?;
            orders::assign_delivery_crew(
                &ctx.database,
                &principal,
                order_id,
                crew_user_id,
                request.status,
            )
            .await
        }
        Role::DeliveryCrew => {
            if request.delivery_crew.is_some() {
                return Err(Error::Forbidden {
                    role: principal.role.to_string(),
                    action: Action::AssignDeliveryCrew.to_string(),
                });
            }
            let status = request.status.ok_or(Error::MissingStatus)?;
            orders::update_status(&ctx.database, &principal, order_id, status).await
        }
        Role::Customer => Err(Error::Forbidden {
            role: principal.role.to_string(),
            action: Action::UpdateOrderStatus.to_string(),
        }),
    }
}

/// Removes an order and its lines.
pub async fn delete_order(ctx: &ApiContext, actor_id: i64, order_id: i64) -> Result<()> {
    let principal = resolve_principal(&ctx.database, actor_id).await?;
    orders::delete_order(&ctx.database, &principal, order_id).await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::api::cart::{self, AddToCartRequest};
    use crate::config::AppConfig;
    use crate::entities::StaffGroup;
    use crate::test_utils::*;

    async fn test_context() -> Result<ApiContext> {
        let db = setup_test_db().await?;
        let config = AppConfig {
            database_url: "sqlite::memory:".to_string(),
            default_page_size: 2,
        };
        Ok(ApiContext::new(db, config))
    }

    /// Seeds a customer whose cart holds one line, ready to check out.
    async fn seed_customer_cart(ctx: &ApiContext, username: &str) -> Result<i64> {
        let category = create_test_category(&ctx.database, username).await?;
        let item = create_test_menu_item(&ctx.database, "Pasta", "8.00", category.id).await?;
        let customer = create_test_user(&ctx.database, username).await?;
        cart::add_to_cart(
            ctx,
            customer.id,
            AddToCartRequest {
                menu_item_id: item.id,
                quantity: 1,
            },
        )
        .await?;
        Ok(customer.id)
    }

    #[tokio::test]
    async fn test_manager_update_needs_a_crew_assignment() -> Result<()> {
        let ctx = test_context().await?;
        let customer_id = seed_customer_cart(&ctx, "alice").await?;
        let placed = checkout(&ctx, customer_id).await?.order;

        let manager = create_test_staff(&ctx.database, "maria", StaffGroup::Manager).await?;
        let result = update_order(
            &ctx,
            manager.id,
            placed.id,
            OrderUpdateRequest {
                status: Some(OrderStatus::Assigned),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::MissingDeliveryCrew));

        let courier = create_test_staff(&ctx.database, "dan", StaffGroup::DeliveryCrew).await?;
        let updated = update_order(
            &ctx,
            manager.id,
            placed.id,
            OrderUpdateRequest {
                delivery_crew: Some(courier.id),
                status: None,
            },
        )
        .await?;
        assert_eq!(updated.status, OrderStatus::Assigned);
        assert_eq!(updated.delivery_crew_id, Some(courier.id));

        Ok(())
    }

    #[tokio::test]
    async fn test_courier_update_moves_status_only() -> Result<()> {
        let ctx = test_context().await?;
        let customer_id = seed_customer_cart(&ctx, "alice").await?;
        let placed = checkout(&ctx, customer_id).await?.order;

        let manager = create_test_staff(&ctx.database, "maria", StaffGroup::Manager).await?;
        let courier = create_test_staff(&ctx.database, "dan", StaffGroup::DeliveryCrew).await?;
        update_order(
            &ctx,
            manager.id,
            placed.id,
            OrderUpdateRequest {
                delivery_crew: Some(courier.id),
                status: None,
            },
        )
        .await?;

        // A courier offering a crew assignment is denied outright
        let result = update_order(
            &ctx,
            courier.id,
            placed.id,
            OrderUpdateRequest {
                delivery_crew: Some(courier.id),
                status: Some(OrderStatus::Delivered),
            },
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Forbidden { .. }));

        let result = update_order(&ctx, courier.id, placed.id, OrderUpdateRequest::default()).await;
        assert!(matches!(result.unwrap_err(), Error::MissingStatus));

        let delivered = update_order(
            &ctx,
            courier.id,
            placed.id,
            OrderUpdateRequest {
                delivery_crew: None,
                status: Some(OrderStatus::Delivered),
            },
        )
        .await?;
        assert_eq!(delivered.status, OrderStatus::Delivered);

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_cannot_update_orders() -> Result<()> {
        let ctx = test_context().await?;
        let customer_id = seed_customer_cart(&ctx, "alice").await?;
        let placed = checkout(&ctx, customer_id).await?.order;

        let result = update_order(
            &ctx,
            customer_id,
            placed.id,
            OrderUpdateRequest {
                status: Some(OrderStatus::Delivered),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Forbidden { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_listing_defaults_to_configured_page_size() -> Result<()> {
        let ctx = test_context().await?;
        for name in ["a", "b", "c"] {
            let customer_id = seed_customer_cart(&ctx, name).await?;
            checkout(&ctx, customer_id).await?;
        }
        let manager = create_test_staff(&ctx.database, "maria", StaffGroup::Manager).await?;

        let listing = list_orders(&ctx, manager.id, OrderListQuery::default()).await?;
        assert_eq!(listing.into_orders().unwrap().len(), 2);

        let listing = list_orders(
            &ctx,
            manager.id,
            OrderListQuery {
                per_page: Some(10),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(listing.into_orders().unwrap().len(), 3);

        Ok(())
    }
}
