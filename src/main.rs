//! Provisioning binary: prepares the database and seeds the menu.
//!
//! Run this once before putting an HTTP layer in front of the library,
//! and again whenever config.toml gains new categories or items. Both
//! table creation and seeding are idempotent.

use brigade::config::{AppConfig, database, menu};
use brigade::errors::Result;
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the main application configuration
    let app_config = AppConfig::from_env()
        .inspect_err(|e| error!("Critical error loading application configuration: {e}"))?;
    info!("Successfully processed application configuration.");

    // 4. Initialize database
    let db = database::create_connection(&app_config.database_url)
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to the database: {e}"))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database tables ready."))
        .inspect_err(|e| error!("Failed to create database tables: {e}"))?;

    // 5. Seed the menu from config.toml
    let menu_config = menu::load_default_menu_config()
        .inspect_err(|e| error!("Failed to load menu configuration: {e}"))?;
    menu_config
        .categories
        .iter()
        .for_each(|category| info!("Configured category '{}'", category.slug));
    menu::seed_menu(&db, &menu_config)
        .await
        .inspect(|_| info!("Menu seeded successfully."))
        .inspect_err(|e| error!("Failed to seed menu: {e}"))?;

    info!("Provisioning complete.");
    Ok(())
}
