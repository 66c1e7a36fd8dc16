//! Order entity - A placed order moving through the delivery lifecycle.
//!
//! `total` is computed from the order's lines at checkout and never
//! edited afterwards. An order is `pending` exactly while it has no
//! delivery crew; assignment and delivery progress are tracked by
//! `status`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle state of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed, waiting for a manager to assign delivery crew
    #[sea_orm(string_value = "pending")]
    Pending,

    /// Delivery crew assigned, out for delivery
    #[sea_orm(string_value = "assigned")]
    Assigned,

    /// Handed to the customer
    #[sea_orm(string_value = "delivered")]
    Delivered,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Assigned => write!(f, "assigned"),
            Self::Delivered => write!(f, "delivered"),
        }
    }
}

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the customer who placed the order, immutable
    pub user_id: i64,
    /// ID of the assigned delivery crew member, None while pending
    pub delivery_crew_id: Option<i64>,
    /// Current lifecycle state
    pub status: OrderStatus,
    /// Sum of the order lines' prices
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub total: Decimal,
    /// When the order was placed, immutable
    pub placed_at: DateTimeUtc,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order belongs to one customer
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// One order has many lines
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
