//! Membership entity - Grants a staff group to a user.
//!
//! A user with zero memberships is a plain customer. Memberships are
//! mutated only through the manager-facing group operations; adding the
//! same group twice is a no-op there, so (`user_id`, `group`) pairs stay
//! unique in practice.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Staff group a membership can grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum StaffGroup {
    /// Restaurant managers: menu and order administration
    #[sea_orm(string_value = "manager")]
    Manager,

    /// Delivery crew: fulfil assigned orders
    #[sea_orm(string_value = "delivery_crew")]
    DeliveryCrew,
}

impl std::fmt::Display for StaffGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Manager => write!(f, "manager"),
            Self::DeliveryCrew => write!(f, "delivery crew"),
        }
    }
}

/// Membership database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "memberships")]
pub struct Model {
    /// Unique identifier for the membership row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the user holding the group
    pub user_id: i64,
    /// Which staff group is granted
    pub group: StaffGroup,
}

/// Defines relationships between Membership and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each membership belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
