//! Gift list endpoint handlers.

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
use domain::models::{default_list_title, GiftList, UpdateListRequest};
use persistence::repositories::GiftListRepository;

/// Get the caller's own list, provisioning it on first access.
///
/// Every user has exactly one list; nobody creates one explicitly.
///
/// GET /api/v1/lists/me
pub async fn get_my_list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<GiftList>, ApiError> {
    let lists = GiftListRepository::new(state.pool.clone());
    let title = default_list_title(user.name.as_deref());
    let list = lists
        .find_or_create_for_owner(user.user_id, &title, "")
        .await?;

    Ok(Json(list.into()))
}

/// Rename the caller's list or change its description. Owner only.
///
/// PUT /api/v1/lists/:list_id
pub async fn update_list(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(list_id): Path<Uuid>,
    Json(request): Json<UpdateListRequest>,
) -> Result<Json<GiftList>, ApiError> {
    request.validate()?;
    if request.is_empty() {
        return Err(ApiError::Validation("Nothing to update".to_string()));
    }

    let lists = GiftListRepository::new(state.pool.clone());
    let list = require_owned_list(&lists, list_id, user.user_id).await?;

    let updated = lists
        .update_list(
            list.id,
            request.title.as_deref(),
            request.description.as_deref(),
        )
        .await?;

    Ok(Json(updated.into()))
}

/// Delete the caller's list and everything hanging off it. Owner only.
///
/// DELETE /api/v1/lists/:list_id
pub async fn delete_list(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(list_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let lists = GiftListRepository::new(state.pool.clone());
    let list = require_owned_list(&lists, list_id, user.user_id).await?;

    lists.delete_list(list.id).await?;

    tracing::info!(list_id = %list.id, "Gift list deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Loads a list and checks the caller owns it.
pub(crate) async fn require_owned_list(
    lists: &GiftListRepository,
    list_id: Uuid,
    caller: Uuid,
) -> Result<persistence::entities::GiftListEntity, ApiError> {
    let list = lists
        .find_by_id(list_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("List not found".to_string()))?;

    if list.owner_id != caller {
        return Err(ApiError::Forbidden(
            "Only the list owner can do this".to_string(),
        ));
    }

    Ok(list)
}
