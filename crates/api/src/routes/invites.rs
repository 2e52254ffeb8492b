//! Invitation endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::middleware::metrics::record_invite_redeemed;
use domain::models::{
    invite_expiry, InviteGroupPreview, InvitePreviewResponse, IssueInviteResponse,
    RedeemInviteResponse,
};
use domain::services::PushMessage;
use persistence::repositories::{GroupRepository, InvitationRepository};
use shared::crypto::generate_invite_token;

/// Request body for issuing an invitation.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct IssueInviteRequest {
    /// Optional address to email the invite link to.
    pub email: Option<String>,
}

/// Issue a single-use invitation for a group. Any member may invite.
///
/// POST /api/v1/groups/:group_id/invites
pub async fn issue_invite(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(group_id): Path<Uuid>,
    request: Option<Json<IssueInviteRequest>>,
) -> Result<(StatusCode, Json<IssueInviteResponse>), ApiError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();

    let groups = GroupRepository::new(state.pool.clone());
    let group = groups
        .find_by_id(group_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Group not found".to_string()))?;

    if !groups.is_member(group_id, user.user_id).await? {
        return Err(ApiError::Forbidden(
            "Only group members can issue invitations".to_string(),
        ));
    }

    let token = generate_invite_token();
    let expires_at = invite_expiry(chrono::Utc::now(), state.config.invites.ttl_days);

    let invitations = InvitationRepository::new(state.pool.clone());
    let invitation = invitations
        .create_invitation(&token, group_id, user.user_id, expires_at)
        .await?;

    let url = format!(
        "{}/invite/{}",
        state.config.server.app_base_url.trim_end_matches('/'),
        invitation.token
    );

    // Email delivery is best-effort and must not fail the issue
    if let Some(email) = request.email {
        let service = state.email.clone();
        let inviter = user.name.clone();
        let group_name = group.name.clone();
        let invite_url = url.clone();
        tokio::spawn(async move {
            if let Err(e) = service
                .send_invite_email(&email, inviter.as_deref(), &group_name, &invite_url)
                .await
            {
                tracing::warn!("Failed to send invite email: {}", e);
            }
        });
    }

    tracing::info!(group_id = %group_id, expires_at = %expires_at, "Invitation issued");

    Ok((
        StatusCode::CREATED,
        Json(IssueInviteResponse {
            url,
            token: invitation.token,
            expires_at: invitation.expires_at,
        }),
    ))
}

/// Public preview of a redeemable invitation.
///
/// Missing, expired, revoked and used tokens all answer 404 so the token
/// space leaks nothing about past invitations.
///
/// GET /api/v1/invites/:token
pub async fn preview_invite(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<InvitePreviewResponse>, ApiError> {
    let invitations = InvitationRepository::new(state.pool.clone());
    let preview = invitations
        .find_redeemable_by_token(&token)
        .await?
        .ok_or_else(|| ApiError::NotFound("Invitation not found".to_string()))?;

    Ok(Json(InvitePreviewResponse {
        group: InviteGroupPreview {
            id: preview.group_id,
            name: preview.group_name,
            slug: preview.group_slug,
            member_count: preview.member_count,
        },
        expires_at: preview.expires_at,
    }))
}

/// Redeem an invitation, joining its group.
///
/// Consuming the token and inserting the membership happen in one
/// transaction; concurrent redeemers race on a conditional update and
/// exactly one wins. A redeemer who already belongs to the group still
/// consumes the token and gets `already_member: true`.
///
/// POST /api/v1/invites/:token
pub async fn redeem_invite(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(token): Path<String>,
) -> Result<Json<RedeemInviteResponse>, ApiError> {
    let invitations = InvitationRepository::new(state.pool.clone());
    let outcome = invitations
        .redeem(&token, user.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Invitation not found".to_string()))?;

    record_invite_redeemed();
    tracing::info!(
        group_id = %outcome.group_id,
        newly_joined = outcome.newly_joined,
        "Invitation redeemed"
    );

    // Notify existing members after the commit; never blocks the response
    if outcome.newly_joined {
        let groups = GroupRepository::new(state.pool.clone());
        let notifier = state.notifier.clone();
        let group_id = outcome.group_id;
        let joiner_id = user.user_id;
        let joiner_name = user.name.clone().unwrap_or_else(|| "A new member".to_string());

        tokio::spawn(async move {
            match groups.member_user_ids(group_id).await {
                Ok(member_ids) => {
                    let recipients: Vec<Uuid> = member_ids
                        .into_iter()
                        .filter(|id| *id != joiner_id)
                        .collect();
                    let message =
                        PushMessage::new("New member", format!("{} joined your group", joiner_name));
                    notifier.send_to_users(&recipients, message).await;
                }
                Err(e) => {
                    tracing::warn!("Failed to load recipients for join notification: {}", e);
                }
            }
        });
    }

    Ok(Json(RedeemInviteResponse {
        joined: true,
        group_id: outcome.group_id,
        already_member: !outcome.newly_joined,
    }))
}
