//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test
//! databases and creating test rows with sensible defaults.

#![allow(clippy::unwrap_used)]

use crate::{
    core::roles::{Principal, Role},
    entities::{self, StaffGroup},
    errors::Result,
};
use sea_orm::{Set, prelude::*};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Sets up a complete test environment with one category.
/// Returns (db, category) for menu and order test scenarios.
pub async fn setup_with_category() -> Result<(DatabaseConnection, entities::category::Model)> {
    let db = setup_test_db().await?;
    let category = create_test_category(&db, "mains").await?;
    Ok((db, category))
}

/// Creates a test user with no staff grants.
pub async fn create_test_user(
    db: &DatabaseConnection,
    username: &str,
) -> Result<entities::user::Model> {
    entities::user::ActiveModel {
        username: Set(username.to_string()),
        email: Set(Some(format!("{username}@example.com"))),
        is_admin: Set(false),
        joined_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Creates a test user with the superuser flag set.
pub async fn create_test_admin(
    db: &DatabaseConnection,
    username: &str,
) -> Result<entities::user::Model> {
    entities::user::ActiveModel {
        username: Set(username.to_string()),
        email: Set(None),
        is_admin: Set(true),
        joined_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Creates a test user already holding the given staff group.
pub async fn create_test_staff(
    db: &DatabaseConnection,
    username: &str,
    group: StaffGroup,
) -> Result<entities::user::Model> {
    let user = create_test_user(db, username).await?;
    grant_test_group(db, user.id, group).await?;
    Ok(user)
}

/// Grants a staff group to an existing test user.
pub async fn grant_test_group(
    db: &DatabaseConnection,
    user_id: i64,
    group: StaffGroup,
) -> Result<entities::membership::Model> {
    entities::membership::ActiveModel {
        user_id: Set(user_id),
        group: Set(group),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Creates a test category; the title is the capitalized slug.
pub async fn create_test_category(
    db: &DatabaseConnection,
    slug: &str,
) -> Result<entities::category::Model> {
    let mut chars = slug.chars();
    let title = match chars.next() {
        Some(first) => first.to_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    };

    entities::category::ActiveModel {
        slug: Set(slug.to_string()),
        title: Set(title),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Creates a test menu item priced from a decimal string like "5.00".
pub async fn create_test_menu_item(
    db: &DatabaseConnection,
    title: &str,
    price: &str,
    category_id: i64,
) -> Result<entities::menu_item::Model> {
    let now = chrono::Utc::now().naive_utc();
    entities::menu_item::ActiveModel {
        title: Set(title.to_string()),
        price: Set(price.parse::<Decimal>().unwrap()),
        featured: Set(false),
        category_id: Set(category_id),
        is_deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Builds a [`Principal`] directly, without any database rows.
/// Use this for authorization checks where the caller never needs to
/// exist; operations that write rows keyed by the caller want a real
/// user from [`create_test_user`] instead.
#[must_use]
pub fn test_principal(id: i64, role: Role) -> Principal {
    Principal {
        id,
        username: format!("user{id}"),
        role,
    }
}
