//! Idea endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::routes::relation_to_owner;
use domain::models::{CreateIdeaRequest, IdeaResponse, UpdateIdeaRequest};
use domain::services::{
    can_edit_idea, can_view_list, direct_idea_visibility, idea_visible_to, ListRelation,
};
use persistence::entities::IdeaEntity;
use persistence::repositories::{ClaimRepository, GiftListRepository, IdeaRepository};

/// Query parameters for idea listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ListIdeasQuery {
    pub list_id: Uuid,
}

/// List the ideas on a list, as the caller is allowed to see them.
///
/// The owner gets the list without hidden-for-owner rows; connected
/// non-owners get everything. Hidden ideas are filtered, never an error.
///
/// GET /api/v1/ideas?list_id=...
pub async fn list_ideas(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<ListIdeasQuery>,
) -> Result<Json<Vec<IdeaResponse>>, ApiError> {
    let lists = GiftListRepository::new(state.pool.clone());
    let list = lists
        .find_by_id(query.list_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("List not found".to_string()))?;

    let relation = relation_to_owner(&state, user.user_id, list.owner_id).await?;
    if !can_view_list(relation) {
        return Err(ApiError::Forbidden(
            "You are not connected to this list's owner".to_string(),
        ));
    }

    let include_hidden = matches!(relation, ListRelation::Connected);

    let ideas = IdeaRepository::new(state.pool.clone());
    let rows = ideas.list_for_list(list.id, include_hidden).await?;

    Ok(Json(rows.into_iter().map(IdeaResponse::from).collect()))
}

/// Add an idea directly to a list.
///
/// The owner adds normal ideas; a connected non-owner may add too, in which
/// case the idea is stored hidden from the owner (the surprise path).
///
/// POST /api/v1/ideas
pub async fn create_idea(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<CreateIdeaRequest>,
) -> Result<(StatusCode, Json<IdeaResponse>), ApiError> {
    request.validate()?;

    let lists = GiftListRepository::new(state.pool.clone());
    let list = lists
        .find_by_id(request.list_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("List not found".to_string()))?;

    let relation = relation_to_owner(&state, user.user_id, list.owner_id).await?;
    let hidden_for_owner = direct_idea_visibility(relation).ok_or_else(|| {
        ApiError::Forbidden("You are not connected to this list's owner".to_string())
    })?;

    let ideas = IdeaRepository::new(state.pool.clone());
    let idea = ideas
        .create_idea(
            list.id,
            user.user_id,
            &request.title,
            request.url.as_deref(),
            request.notes.as_deref(),
            request.price_cents,
            request.image.as_deref(),
            hidden_for_owner,
        )
        .await?;

    tracing::info!(idea_id = %idea.id, list_id = %list.id, hidden = hidden_for_owner, "Idea created");

    Ok((StatusCode::CREATED, Json(fresh_idea_response(idea))))
}

/// Update an idea. List owner only; hidden ideas stay invisible to them.
///
/// PUT /api/v1/ideas/:idea_id
pub async fn update_idea(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(idea_id): Path<Uuid>,
    Json(request): Json<UpdateIdeaRequest>,
) -> Result<Json<IdeaResponse>, ApiError> {
    request.validate()?;
    if request.is_empty() {
        return Err(ApiError::Validation("Nothing to update".to_string()));
    }

    let ideas = IdeaRepository::new(state.pool.clone());
    let (idea, relation) = load_idea_for_edit(&state, &ideas, idea_id, user.user_id).await?;

    if !can_edit_idea(relation) {
        return Err(ApiError::Forbidden(
            "Only the list owner can edit ideas".to_string(),
        ));
    }

    let updated = ideas
        .update_idea(
            idea.id,
            request.title.as_deref(),
            request.url.as_deref(),
            request.notes.as_deref(),
            request.price_cents,
            request.image.as_deref(),
        )
        .await?;

    let claims = ClaimRepository::new(state.pool.clone());
    let claim_count = claims.claim_count(updated.id).await?;

    let mut response = fresh_idea_response(updated);
    response.claim_count = claim_count;
    Ok(Json(response))
}

/// Delete an idea and its claims. List owner only.
///
/// DELETE /api/v1/ideas/:idea_id
pub async fn delete_idea(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(idea_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let ideas = IdeaRepository::new(state.pool.clone());
    let (idea, relation) = load_idea_for_edit(&state, &ideas, idea_id, user.user_id).await?;

    if !can_edit_idea(relation) {
        return Err(ApiError::Forbidden(
            "Only the list owner can delete ideas".to_string(),
        ));
    }

    ideas.delete_idea(idea.id).await?;

    tracing::info!(idea_id = %idea.id, "Idea deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Loads an idea plus the caller's relation to its list, hiding ideas the
/// caller may not see behind a generic 404.
pub(crate) async fn load_idea_for_edit(
    state: &AppState,
    ideas: &IdeaRepository,
    idea_id: Uuid,
    caller: Uuid,
) -> Result<(IdeaEntity, ListRelation), ApiError> {
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
        // Same body as a truly missing idea
        return Err(ApiError::NotFound("Idea not found".to_string()));
    }

    Ok((idea, relation))
}

/// Builds a response from a just-written row. A freshly created idea has no
/// claims; callers that know better overwrite `claim_count`.
fn fresh_idea_response(idea: IdeaEntity) -> IdeaResponse {
    IdeaResponse {
        id: idea.id,
        list_id: idea.list_id,
        title: idea.title,
        url: idea.url,
        notes: idea.notes,
        price_cents: idea.price_cents,
        image: idea.image,
        hidden_for_owner: idea.hidden_for_owner,
        claim_count: 0,
        created_at: idea.created_at,
    }
}
