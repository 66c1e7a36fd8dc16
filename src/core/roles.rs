//! Role resolution - Maps an authenticated user to one effective role.
//!
//! Request handling resolves the caller's role exactly once, at entry, and
//! passes the resulting [`Principal`] through every subsequent check. That
//! keeps authorization decisions free of repeated membership queries and
//! makes the precedence between overlapping grants explicit: the admin
//! flag wins over a manager membership, which wins over a delivery-crew
//! membership, and a user with no grants at all acts as a customer.

use crate::{
    entities::{Membership, StaffGroup, User, membership},
    errors::{Error, Result},
};
use sea_orm::prelude::*;

/// Effective role of a caller for the duration of one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// No staff grants; owns a cart and their own orders
    Customer,
    /// Fulfils orders assigned to them
    DeliveryCrew,
    /// Administers the menu, orders, and staff groups
    Manager,
    /// Superuser; holds every manager permission
    Admin,
}

impl Role {
    /// Whether the role carries manager-level permissions.
    #[must_use]
    pub fn is_manager(self) -> bool {
        matches!(self, Self::Manager | Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::DeliveryCrew => write!(f, "delivery crew"),
            Self::Manager => write!(f, "manager"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// An authenticated caller with their role already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// User ID of the caller
    pub id: i64,
    /// Login name, used in messages and logs
    pub username: String,
    /// Effective role for this operation
    pub role: Role,
}

/// Resolves an authenticated user ID to a [`Principal`].
///
/// The user must exist; authentication happens upstream, so an unknown ID
/// here means the identity store and this database disagree. Membership
/// rows are read once and collapsed to a single role by precedence.
pub async fn resolve_principal(db: &DatabaseConnection, user_id: i64) -> Result<Principal> {
    let user = User::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::UserNotFound {
            user: user_id.to_string(),
        })?;

    if user.is_admin {
        return Ok(Principal {
            id: user.id,
            username: user.username,
            role: Role::Admin,
        });
    }

    let memberships = Membership::find()
        .filter(membership::Column::UserId.eq(user.id))
        .all(db)
        .await?;

    let role = if memberships.iter().any(|m| m.group == StaffGroup::Manager) {
        Role::Manager
    } else if memberships
        .iter()
        .any(|m| m.group == StaffGroup::DeliveryCrew)
    {
        Role::DeliveryCrew
    } else {
        Role::Customer
    };

    Ok(Principal {
        id: user.id,
        username: user.username,
        role,
    })
}

/// Checks whether a user currently holds a staff group.
///
/// Generic over the connection so callers can run it inside an open
/// transaction.
pub async fn holds_group<C: ConnectionTrait>(
    conn: &C,
    user_id: i64,
    group: StaffGroup,
) -> Result<bool> {
    let count = Membership::find()
        .filter(membership::Column::UserId.eq(user_id))
        .filter(membership::Column::Group.eq(group))
        .count(conn)
        .await?;
    Ok(count > 0)
}
