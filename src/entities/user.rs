//! User entity - Represents an authenticated account in the system.
//!
//! Users are created by an external identity provider; this crate only
//! reads them. The `is_admin` flag marks superusers, who are treated as
//! managers for authorization purposes. Staff roles (manager, delivery
//! crew) are granted through `membership` rows, not stored here.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login name, unique across the system (e.g., "adrian")
    #[sea_orm(unique)]
    pub username: String,
    /// Contact email, if the identity provider supplied one
    pub email: Option<String>,
    /// Superuser flag; admins hold every manager permission
    pub is_admin: bool,
    /// When the account was created
    pub joined_at: DateTimeUtc,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user has many group memberships
    #[sea_orm(has_many = "super::membership::Entity")]
    Memberships,
    /// One user has many cart lines
    #[sea_orm(has_many = "super::cart_item::Entity")]
    CartItems,
    /// One user has many placed orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::membership::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Memberships.def()
    }
}

impl Related<super::cart_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CartItems.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
