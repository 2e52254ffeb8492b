//! Group endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use domain::models::{
    CreateGroupRequest, Group, GroupRole, GroupSummary, MemberInfo, MemberListRef,
    UpdateGroupRequest,
};
use domain::services::{can_manage_group, can_view_group};
use persistence::entities::GroupEntity;
use persistence::repositories::GroupRepository;
use shared::validation::slugify;

/// Create a new group. The caller becomes its owner.
///
/// POST /api/v1/groups
pub async fn create_group(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<Group>), ApiError> {
    request.validate()?;

    let slug = match &request.slug {
        Some(slug) => slug.clone(),
        None => slugify(&request.name),
    };
    if slug.is_empty() {
        return Err(ApiError::Validation(
            "Group name does not produce a usable slug".to_string(),
        ));
    }

    let groups = GroupRepository::new(state.pool.clone());
    if groups.slug_taken(&slug, None).await? {
        return Err(ApiError::Conflict("Group slug is already taken".to_string()));
    }

    let group = groups
        .create_group(&request.name, &slug, user.user_id)
        .await?;

    tracing::info!(group_id = %group.id, slug = %group.slug, "Group created");

    Ok((StatusCode::CREATED, Json(group.into())))
}

/// List the groups the caller belongs to, with member counts.
///
/// GET /api/v1/groups
pub async fn list_groups(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<GroupSummary>>, ApiError> {
    let groups = GroupRepository::new(state.pool.clone());
    let rows = groups.find_user_groups(user.user_id).await?;

    let summaries = rows
        .into_iter()
        .map(|row| GroupSummary {
            id: row.id,
            name: row.name,
            slug: row.slug,
            owner_id: row.owner_id,
            member_count: row.member_count,
        })
        .collect();

    Ok(Json(summaries))
}

/// Rename a group or change its slug. Owner only.
///
/// PUT /api/v1/groups/:group_id
pub async fn update_group(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(group_id): Path<Uuid>,
    Json(request): Json<UpdateGroupRequest>,
) -> Result<Json<Group>, ApiError> {
    request.validate()?;
    if request.is_empty() {
        return Err(ApiError::Validation("Nothing to update".to_string()));
    }

    let groups = GroupRepository::new(state.pool.clone());
    let group = require_owned_group(&groups, group_id, user.user_id).await?;

    if let Some(slug) = &request.slug {
        if groups.slug_taken(slug, Some(group.id)).await? {
            return Err(ApiError::Conflict("Group slug is already taken".to_string()));
        }
    }

    let updated = groups
        .update_group(group.id, request.name.as_deref(), request.slug.as_deref())
        .await?;

    Ok(Json(updated.into()))
}

/// Delete a group with its memberships and invitations. Owner only.
///
/// DELETE /api/v1/groups/:group_id
pub async fn delete_group(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(group_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let groups = GroupRepository::new(state.pool.clone());
    let group = require_owned_group(&groups, group_id, user.user_id).await?;

    groups.delete_group(group.id).await?;

    tracing::info!(group_id = %group.id, "Group deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// List group members with their gift-list pointers. Members only.
///
/// GET /api/v1/groups/:group_id/members
pub async fn list_members(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(group_id): Path<Uuid>,
) -> Result<Json<Vec<MemberInfo>>, ApiError> {
    let groups = GroupRepository::new(state.pool.clone());

    let group = groups
        .find_by_id(group_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Group not found".to_string()))?;

    let role = membership_role(&groups, &group, user.user_id).await?;
    if !can_view_group(role) {
        return Err(ApiError::Forbidden(
            "You are not a member of this group".to_string(),
        ));
    }

    let rows = groups.list_members(group_id).await?;

    let members = rows
        .into_iter()
        .map(|row| MemberInfo {
            user_id: row.user_id,
            name: row.user_name,
            role: GroupRole::from(row.role),
            list: match (row.list_id, row.list_title) {
                (Some(id), Some(title)) => Some(MemberListRef { id, title }),
                _ => None,
            },
        })
        .collect();

    Ok(Json(members))
}

/// Loads a group and checks the caller's role allows managing it.
async fn require_owned_group(
    groups: &GroupRepository,
    group_id: Uuid,
    caller: Uuid,
) -> Result<GroupEntity, ApiError> {
    let group = groups
        .find_by_id(group_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Group not found".to_string()))?;

    let role = membership_role(groups, &group, caller).await?;
    if !can_manage_group(role) {
        return Err(ApiError::Forbidden(
            "Only the group owner can do this".to_string(),
        ));
    }

    Ok(group)
}

/// Resolves the caller's role in a group, `None` for non-members.
async fn membership_role(
    groups: &GroupRepository,
    group: &GroupEntity,
    caller: Uuid,
) -> Result<Option<GroupRole>, ApiError> {
    if group.owner_id == caller {
        return Ok(Some(GroupRole::Owner));
    }
    if groups.is_member(group.id, caller).await? {
        return Ok(Some(GroupRole::Member));
    }
    Ok(None)
}
