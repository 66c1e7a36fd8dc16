//! Cart endpoints - the caller's own cart, customers only.

use crate::{
    api::ApiContext,
    core::{cart, roles::resolve_principal},
    entities::cart_item,
    errors::Result,
};
use serde::Deserialize;

/// Payload for adding a line to the cart.
#[derive(Debug, Clone, Deserialize)]
pub struct AddToCartRequest {
    /// Menu item to add
    pub menu_item_id: i64,
    /// Units to add, at least 1
    pub quantity: i32,
}

/// Lists the caller's cart lines.
pub async fn get_cart(ctx: &ApiContext, actor_id: i64) -> Result<Vec<cart_item::Model>> {
    let principal = resolve_principal(&ctx.database, actor_id).await?;
    cart::get_cart(&ctx.database, &principal).await
}

/// Adds a line to the caller's cart at the current menu price.
pub async fn add_to_cart(
    ctx: &ApiContext,
    actor_id: i64,
    request: AddToCartRequest,
) -> Result<cart_item::Model> {
    let principal = resolve_principal(&ctx.database, actor_id).await?;
    cart::add_to_cart(
        &ctx.database,
        &principal,
        request.menu_item_id,
        request.quantity,
    )
    .await
}

/// Empties the caller's cart, reporting how many lines were removed.
pub async fn clear_cart(ctx: &ApiContext, actor_id: i64) -> Result<u64> {
    let principal = resolve_principal(&ctx.database, actor_id).await?;
    cart::clear_cart(&ctx.database, &principal).await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::config::AppConfig;
    use crate::entities::StaffGroup;
    use crate::errors::Error;
    use crate::test_utils::*;
    use sea_orm::prelude::Decimal;

    async fn test_context() -> Result<ApiContext> {
        let db = setup_test_db().await?;
        let config = AppConfig {
            database_url: "sqlite::memory:".to_string(),
            default_page_size: 2,
        };
        Ok(ApiContext::new(db, config))
    }

    #[tokio::test]
    async fn test_cart_round_trip() -> Result<()> {
        let ctx = test_context().await?;
        let category = create_test_category(&ctx.database, "mains").await?;
        let item = create_test_menu_item(&ctx.database, "Wrap", "4.50", category.id).await?;
        let customer = create_test_user(&ctx.database, "casual").await?;

        let line = add_to_cart(
            &ctx,
            customer.id,
            AddToCartRequest {
                menu_item_id: item.id,
                quantity: 2,
            },
        )
        .await?;
        assert_eq!(line.price, Decimal::new(900, 2));

        assert_eq!(get_cart(&ctx, customer.id).await?.len(), 1);
        assert_eq!(clear_cart(&ctx, customer.id).await?, 1);
        assert!(get_cart(&ctx, customer.id).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_staff_are_turned_away() -> Result<()> {
        let ctx = test_context().await?;
        let courier = create_test_staff(&ctx.database, "dan", StaffGroup::DeliveryCrew).await?;

        let result = get_cart(&ctx, courier.id).await;
        assert!(matches!(result.unwrap_err(), Error::Forbidden { .. }));

        Ok(())
    }
}
