//! Session authentication extractor.
//!
//! Validates gateway session tokens from the Authorization header and
//! provisions the user row on first sight.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use persistence::repositories::UserRepository;

/// Authenticated caller resolved from a gateway session token.
///
/// Accounts live in the identity gateway; the first request a user makes
/// here upserts their local row, so handlers can always assume it exists.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// User ID from the session token subject claim.
    pub user_id: Uuid,
    /// Display name as known by the gateway, if any.
    pub name: Option<String>,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Resolved once per request even if multiple extractors run
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| {
                ApiError::Unauthorized("Invalid Authorization header format".to_string())
            })?;

        let claims = state
            .session_keys
            .validate(token)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired session token".to_string()))?;

        let user_id = claims
            .user_id()
            .map_err(|_| ApiError::Unauthorized("Invalid session subject".to_string()))?;

        let users = UserRepository::new(state.pool.clone());
        users
            .upsert_from_session(user_id, claims.name.as_deref())
            .await?;

        let user = CurrentUser {
            user_id,
            name: claims.name,
        };
        parts.extensions.insert(user.clone());

        Ok(user)
    }
}
