//! Staff group administration - Manager and delivery-crew rosters.
//!
//! Managers curate both rosters. Granting a group a user already holds is
//! a quiet no-op, and revoking reports whether anything was actually
//! removed; the end state is what callers care about. Role resolution
//! picks these rows up on the next operation, so a grant takes effect
//! immediately.

use crate::{
    core::{
        policy::{self, Action},
        roles::Principal,
    },
    entities::{Membership, StaffGroup, User, membership, user},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

const fn action_for(group: StaffGroup) -> Action {
    match group {
        StaffGroup::Manager => Action::ManageManagerGroup,
        StaffGroup::DeliveryCrew => Action::ManageDeliveryGroup,
    }
}

/// Lists the users currently holding a staff group.
pub async fn list_members(
    db: &DatabaseConnection,
    principal: &Principal,
    group: StaffGroup,
) -> Result<Vec<user::Model>> {
    policy::authorize(principal, action_for(group))?;

    let memberships = Membership::find()
        .filter(membership::Column::Group.eq(group))
        .all(db)
        .await?;
    let user_ids: Vec<i64> = memberships.iter().map(|m| m.user_id).collect();

    User::find()
        .filter(user::Column::Id.is_in(user_ids))
        .order_by_asc(user::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Grants a staff group to the user with this username.
///
/// Granting an already-held group succeeds without writing a second row.
pub async fn add_member(
    db: &DatabaseConnection,
    principal: &Principal,
    username: &str,
    group: StaffGroup,
) -> Result<user::Model> {
    policy::authorize(principal, action_for(group))?;

    let txn = db.begin().await?;

    let target = User::find()
        .filter(user::Column::Username.eq(username))
        .one(&txn)
        .await?
        .ok_or_else(|| Error::UserNotFound {
            user: username.to_string(),
        })?;

    let already_member = Membership::find()
        .filter(membership::Column::UserId.eq(target.id))
        .filter(membership::Column::Group.eq(group))
        .one(&txn)
        .await?
        .is_some();

    if !already_member {
        membership::ActiveModel {
            user_id: Set(target.id),
            group: Set(group),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    info!(
        "User '{}' granted {} group by {}",
        target.username, group, principal.username
    );
    Ok(target)
}

/// Revokes a staff group from a user by ID.
///
/// Returns whether a membership was actually removed; revoking a group
/// the user never held is not an error.
pub async fn remove_member(
    db: &DatabaseConnection,
    principal: &Principal,
    user_id: i64,
    group: StaffGroup,
) -> Result<bool> {
    policy::authorize(principal, action_for(group))?;

    let target = User::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::UserNotFound {
            user: user_id.to_string(),
        })?;

    let deleted = Membership::delete_many()
        .filter(membership::Column::UserId.eq(target.id))
        .filter(membership::Column::Group.eq(group))
        .exec(db)
        .await?;

    let removed = deleted.rows_affected > 0;
    if removed {
        info!(
            "User '{}' removed from {} group by {}",
            target.username, group, principal.username
        );
    }
    Ok(removed)
}
