//! Menu seed configuration loading from config.toml
//!
//! This module loads the initial menu from a TOML configuration file.
//! The categories and items defined in config.toml are used to seed the
//! database on first run; rows that already exist are left alone, so
//! seeding is safe to repeat on every startup.

use crate::entities::{Category, MenuItem, category, menu_item};
use crate::errors::{Error, Result};
use sea_orm::{Set, TransactionTrait, prelude::*};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct MenuConfig {
    /// Menu categories to seed, each with its items
    pub categories: Vec<CategoryConfig>,
}

/// Configuration for a single menu category
#[derive(Debug, Deserialize, Clone)]
pub struct CategoryConfig {
    /// URL-friendly identifier (e.g., "mains")
    pub slug: String,
    /// Display name (e.g., "Mains")
    pub title: String,
    /// Items sold under this category
    #[serde(default)]
    pub items: Vec<MenuItemConfig>,
}

/// Configuration for a single menu item
#[derive(Debug, Deserialize, Clone)]
pub struct MenuItemConfig {
    /// Display name of the dish
    pub title: String,
    /// Price per unit, written as a string to stay exact (e.g., "12.50")
    pub price: Decimal,
    /// Whether the item starts out featured
    #[serde(default)]
    pub featured: bool,
}

/// Loads menu configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_menu_config<P: AsRef<Path>>(path: P) -> Result<MenuConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads menu configuration from the default location (./config.toml)
pub fn load_default_menu_config() -> Result<MenuConfig> {
    load_menu_config("config.toml")
}

/// Seeds the menu tables from the loaded configuration.
///
/// Categories are matched by slug and items by title within their
/// category; anything already present is skipped, so existing prices and
/// edits survive a reseed.
pub async fn seed_menu(db: &DatabaseConnection, config: &MenuConfig) -> Result<()> {
    info!(
        "Seeding menu. Found {} categories in configuration.",
        config.categories.len()
    );

    let txn = db.begin().await?;

    for category_config in &config.categories {
        let existing = Category::find()
            .filter(category::Column::Slug.eq(category_config.slug.as_str()))
            .one(&txn)
            .await?;

        let category = match existing {
            Some(category) => {
                debug!("Category '{}' already exists. Skipping.", category.slug);
                category
            }
            None => {
                info!("Inserting new category '{}'", category_config.slug);
                category::ActiveModel {
                    slug: Set(category_config.slug.clone()),
                    title: Set(category_config.title.clone()),
                    ..Default::default()
                }
                .insert(&txn)
                .await?
            }
        };

        for item_config in &category_config.items {
            let already_present = MenuItem::find()
                .filter(menu_item::Column::Title.eq(item_config.title.as_str()))
                .filter(menu_item::Column::CategoryId.eq(category.id))
                .one(&txn)
                .await?
                .is_some();
            if already_present {
                debug!(
                    "Menu item '{}' already exists. Skipping.",
                    item_config.title
                );
                continue;
            }

            info!(
                "Inserting new menu item '{}' under '{}'",
                item_config.title, category.slug
            );
            let now = chrono::Utc::now().naive_utc();
            menu_item::ActiveModel {
                title: Set(item_config.title.clone()),
                price: Set(item_config.price),
                featured: Set(item_config.featured),
                category_id: Set(category.id),
                is_deleted: Set(false),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }
    }

    txn.commit().await?;
    Ok(())
}
