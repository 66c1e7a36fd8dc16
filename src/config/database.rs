//! Database connection and table creation using `SeaORM`.
//!
//! Tables are generated straight from the entity definitions with
//! `Schema::create_table_from_entity`, so the database schema always
//! matches the Rust structs without hand-written SQL. Creation order
//! follows the foreign keys: users and categories first, then the
//! tables that reference them.

use crate::entities::{CartItem, Category, Membership, MenuItem, Order, OrderItem, User};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Establishes a connection to the database at the given URL.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all tables from the entity definitions.
///
/// Tables that already exist are left alone, so provisioning can run
/// against the same database repeatedly.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let statements = [
        schema.create_table_from_entity(User),
        schema.create_table_from_entity(Membership),
        schema.create_table_from_entity(Category),
        schema.create_table_from_entity(MenuItem),
        schema.create_table_from_entity(CartItem),
        schema.create_table_from_entity(Order),
        schema.create_table_from_entity(OrderItem),
    ];

    for mut statement in statements {
        statement.if_not_exists();
        db.execute(builder.build(&statement)).await?;
    }

    Ok(())
}
