//! Mounting surface - request types and dispatch over the core.
//!
//! This layer is what an HTTP router mounts, one route per function. Each
//! function resolves the caller's principal once, fills in paging
//! defaults from the application config, and delegates to the core. No
//! transport types appear here; a router turns the typed errors into
//! status codes via [`crate::errors::ErrorKind::http_status`].

/// Cart endpoints for customers
pub mod cart;
/// Staff group roster endpoints
pub mod groups;
/// Menu browsing and curation endpoints
pub mod menu;
/// Checkout and order lifecycle endpoints
pub mod orders;

use crate::{config::AppConfig, core::listing::Page, errors::Result};
use sea_orm::DatabaseConnection;

/// Shared state available to every endpoint.
pub struct ApiContext {
    /// Database connection for all storage access
    pub database: DatabaseConnection,
    /// Application settings resolved at startup
    pub config: AppConfig,
}

impl ApiContext {
    /// Creates the shared endpoint state.
    #[must_use]
    pub const fn new(database: DatabaseConnection, config: AppConfig) -> Self {
        Self { database, config }
    }
}

/// Fills a page window from query parameters, falling back to page 1 and
/// the configured default page size.
pub(crate) fn resolve_page(
    ctx: &ApiContext,
    page: Option<u64>,
    per_page: Option<u64>,
) -> Result<Page> {
    Page::new(
        page.unwrap_or(1),
        per_page.unwrap_or(ctx.config.default_page_size),
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::Error;

    fn test_config() -> AppConfig {
        AppConfig {
            database_url: "sqlite::memory:".to_string(),
            default_page_size: 2,
        }
    }

    #[tokio::test]
    async fn test_resolve_page_applies_defaults() -> Result<()> {
        let db = crate::test_utils::setup_test_db().await?;
        let ctx = ApiContext::new(db, test_config());

        let page = resolve_page(&ctx, None, None)?;
        assert_eq!(page.number, 1);
        assert_eq!(page.size, 2);

        let page = resolve_page(&ctx, Some(3), Some(20))?;
        assert_eq!(page.number, 3);
        assert_eq!(page.size, 20);

        let result = resolve_page(&ctx, Some(0), None);
        assert!(matches!(result.unwrap_err(), Error::InvalidPage { .. }));

        Ok(())
    }
}
