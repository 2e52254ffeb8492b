//! Claim endpoint handlers.
//!
//! A claim marks "I'm getting this" on someone else's idea. Who claimed is
//! never serialized to any caller; only the caller's own claimed state and
//! aggregate counts leave the server.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::middleware::metrics::record_claim_toggled;
use crate::routes::relation_to_owner;
use domain::models::ClaimStatusResponse;
use domain::services::{can_toggle_claim, idea_visible_to};
use persistence::entities::IdeaEntity;
use persistence::repositories::{ClaimRepository, GiftListRepository, IdeaRepository};

/// Whether the caller currently claims the idea.
///
/// GET /api/v1/ideas/:idea_id/claim
pub async fn get_claim_status(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(idea_id): Path<Uuid>,
) -> Result<Json<ClaimStatusResponse>, ApiError> {
    let idea = load_visible_idea(&state, idea_id, user.user_id).await?;

    let claims = ClaimRepository::new(state.pool.clone());
    let claimed = claims.is_claimed_by(idea.id, user.user_id).await?;

    Ok(Json(ClaimStatusResponse { claimed }))
}

/// Toggle the caller's claim on an idea.
///
/// Connected non-owners only; claiming your own authored idea is forbidden.
/// The toggle is insert-first so two concurrent claimers resolve cleanly.
///
/// POST /api/v1/ideas/:idea_id/claim
pub async fn toggle_claim(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(idea_id): Path<Uuid>,
) -> Result<Json<ClaimStatusResponse>, ApiError> {
    let idea = load_visible_idea(&state, idea_id, user.user_id).await?;

    let lists = GiftListRepository::new(state.pool.clone());
    let list = lists
        .find_by_id(idea.list_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Idea not found".to_string()))?;

    let relation = relation_to_owner(&state, user.user_id, list.owner_id).await?;
    if !can_toggle_claim(relation, idea.created_by, user.user_id) {
        return Err(ApiError::Forbidden(
            "You cannot claim this idea".to_string(),
        ));
    }

    let claims = ClaimRepository::new(state.pool.clone());
    let claimed = claims.toggle(idea.id, user.user_id).await?;

    record_claim_toggled(claimed);
    tracing::info!(idea_id = %idea.id, claimed = claimed, "Claim toggled");

    Ok(Json(ClaimStatusResponse { claimed }))
}

/// Loads an idea the caller is allowed to see, 404 otherwise.
async fn load_visible_idea(
    state: &AppState,
    idea_id: Uuid,
    caller: Uuid,
) -> Result<IdeaEntity, ApiError> {
    let ideas = IdeaRepository::new(state.pool.clone());
    let idea = ideas
        .find_by_id(idea_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Idea not found".to_string()))?;

    let lists = GiftListRepository::new(state.pool.clone());
    let list = lists
        .find_by_id(idea.list_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Idea not found".to_string()))?;

    let relation = relation_to_owner(state, caller, list.owner_id).await?;
    if !idea_visible_to(relation, idea.hidden_for_owner) {
        return Err(ApiError::NotFound("Idea not found".to_string()));
    }

    Ok(idea)
}
