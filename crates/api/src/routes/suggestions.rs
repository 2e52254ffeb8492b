//! Suggestion endpoint handlers.

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
use crate::middleware::metrics::record_suggestion_reviewed;
use crate::routes::relation_to_owner;
use domain::models::{
    CreateSuggestionRequest, ReviewAction, ReviewSuggestionRequest, ReviewSuggestionResponse,
    Suggestion, SuggestionStatus,
};
use domain::services::{can_review_suggestions, can_suggest, PushMessage};
use persistence::repositories::{GiftListRepository, SuggestionRepository};

/// Suggest an idea for a connected user's list.
///
/// Connected non-owners only; the owner never suggests to themselves.
/// Suggestions are invisible to everyone but the owner until reviewed.
///
/// POST /api/v1/suggestions
pub async fn create_suggestion(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<CreateSuggestionRequest>,
) -> Result<(StatusCode, Json<Suggestion>), ApiError> {
    request.validate()?;

    let lists = GiftListRepository::new(state.pool.clone());
    let list = lists
        .find_by_id(request.list_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("List not found".to_string()))?;

    let relation = relation_to_owner(&state, user.user_id, list.owner_id).await?;
    if !can_suggest(relation) {
        return Err(ApiError::Forbidden(
            "You can only suggest to a connected user's list".to_string(),
        ));
    }

    let suggestions = SuggestionRepository::new(state.pool.clone());
    let suggestion = suggestions
        .create_suggestion(
            list.id,
            user.user_id,
            &request.title,
            request.url.as_deref(),
            request.notes.as_deref(),
            request.price_cents,
            request.image.as_deref(),
        )
        .await?;

    tracing::info!(suggestion_id = %suggestion.id, list_id = %list.id, "Suggestion created");

    Ok((StatusCode::CREATED, Json(suggestion.into())))
}

/// List pending suggestions for a list. Owner only.
///
/// GET /api/v1/lists/:list_id/suggestions
pub async fn list_for_list(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(list_id): Path<Uuid>,
) -> Result<Json<Vec<Suggestion>>, ApiError> {
    let lists = GiftListRepository::new(state.pool.clone());
    let list = lists
        .find_by_id(list_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("List not found".to_string()))?;

    let relation = relation_to_owner(&state, user.user_id, list.owner_id).await?;
    if !can_review_suggestions(relation) {
        return Err(ApiError::Forbidden(
            "Only the list owner can see suggestions".to_string(),
        ));
    }

    let suggestions = SuggestionRepository::new(state.pool.clone());
    let rows = suggestions.list_pending_for_list(list.id).await?;

    Ok(Json(rows.into_iter().map(Suggestion::from).collect()))
}

/// Accept or reject a pending suggestion. Owner only.
///
/// Accepting spawns a visible idea on the list in the same transaction that
/// flips the status; a suggestion already reviewed answers 409 and nothing
/// is spawned twice.
///
/// PUT /api/v1/suggestions/:suggestion_id
pub async fn review_suggestion(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(suggestion_id): Path<Uuid>,
    Json(request): Json<ReviewSuggestionRequest>,
) -> Result<Json<ReviewSuggestionResponse>, ApiError> {
    let suggestions = SuggestionRepository::new(state.pool.clone());
    let suggestion = suggestions
        .find_by_id(suggestion_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Suggestion not found".to_string()))?;

    let lists = GiftListRepository::new(state.pool.clone());
    let list = lists
        .find_by_id(suggestion.list_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Suggestion not found".to_string()))?;

    let relation = relation_to_owner(&state, user.user_id, list.owner_id).await?;
    if !can_review_suggestions(relation) {
        return Err(ApiError::Forbidden(
            "Only the list owner can review suggestions".to_string(),
        ));
    }

    match request.action {
        ReviewAction::Accept => {
            let (reviewed, idea) = suggestions
                .accept(suggestion.id, user.user_id)
                .await?
                .ok_or_else(|| {
                    ApiError::Conflict("Suggestion has already been reviewed".to_string())
                })?;

            record_suggestion_reviewed("accepted");
            tracing::info!(
                suggestion_id = %reviewed.id,
                idea_id = %idea.id,
                "Suggestion accepted"
            );

            notify_suggester(&state, reviewed.created_by, &user, &reviewed.title);

            Ok(Json(ReviewSuggestionResponse {
                suggestion_id: reviewed.id,
                status: SuggestionStatus::Accepted,
                idea_id: Some(idea.id),
            }))
        }
        ReviewAction::Reject => {
            let reviewed = suggestions.reject(suggestion.id).await?.ok_or_else(|| {
                ApiError::Conflict("Suggestion has already been reviewed".to_string())
            })?;

            record_suggestion_reviewed("rejected");
            tracing::info!(suggestion_id = %reviewed.id, "Suggestion rejected");

            Ok(Json(ReviewSuggestionResponse {
                suggestion_id: reviewed.id,
                status: SuggestionStatus::Rejected,
                idea_id: None,
            }))
        }
    }
}

/// Post-commit push to the suggester on acceptance. Best-effort.
fn notify_suggester(state: &AppState, suggester: Uuid, reviewer: &CurrentUser, title: &str) {
    let notifier = state.notifier.clone();
    let reviewer_name = reviewer
        .name
        .clone()
        .unwrap_or_else(|| "The list owner".to_string());
    let message = PushMessage::new(
        "Suggestion accepted",
        format!("{} accepted your suggestion \"{}\"", reviewer_name, title),
    );

    tokio::spawn(async move {
        notifier.send_to_users(&[suggester], message).await;
    });
}
