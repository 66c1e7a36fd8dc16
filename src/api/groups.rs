//! Staff group endpoints - manager and delivery-crew rosters.

use crate::{
    api::ApiContext,
    core::{groups, roles::resolve_principal},
    entities::{StaffGroup, user},
    errors::{Error, Result},
};
use serde::Deserialize;

/// Payload for granting a staff group.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignGroupRequest {
    /// Username to grant the group to
    pub username: Option<String>,
}

/// Lists the users currently holding a staff group.
pub async fn list_group_members(
    ctx: &ApiContext,
    actor_id: i64,
    group: StaffGroup,
) -> Result<Vec<user::Model>> {
    let principal = resolve_principal(&ctx.database, actor_id).await?;
    groups::list_members(&ctx.database, &principal, group).await
}

/// Grants a staff group to the named user.
pub async fn add_group_member(
    ctx: &ApiContext,
    actor_id: i64,
    group: StaffGroup,
    request: AssignGroupRequest,
) -> Result<user::Model> {
    let principal = resolve_principal(&ctx.database, actor_id).await?;
    let username = request.username.ok_or(Error::MissingUsername)?;
    groups::add_member(&ctx.database, &principal, &username, group).await
}

/// Revokes a staff group from a user by ID.
pub async fn remove_group_member(
    ctx: &ApiContext,
    actor_id: i64,
    group: StaffGroup,
    user_id: i64,
) -> Result<bool> {
    let principal = resolve_principal(&ctx.database, actor_id).await?;
    groups::remove_member(&ctx.database, &principal, user_id, group).await
}
