//! Profile endpoint handlers.

use axum::{extract::State, Json};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use domain::models::{ProfileResponse, UpdateProfileRequest, User};
use persistence::repositories::UserRepository;

/// Get the caller's profile.
///
/// GET /api/v1/profile
pub async fn get_profile(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let users = UserRepository::new(state.pool.clone());
    // The extractor upserted the row; a miss here means the database vanished
    let row = users
        .find_by_id(user.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(ProfileResponse::from(User::from(row))))
}

/// Update the caller's display name or avatar.
///
/// PUT /api/v1/profile
pub async fn update_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    request.validate()?;
    if request.is_empty() {
        return Err(ApiError::Validation("Nothing to update".to_string()));
    }

    let users = UserRepository::new(state.pool.clone());
    let row = users
        .update_profile(
            user.user_id,
            request.name.as_deref(),
            request.avatar_url.as_deref(),
        )
        .await?;

    Ok(Json(ProfileResponse::from(User::from(row))))
}
