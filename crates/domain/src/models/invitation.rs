//! Invitation domain models.
//!
//! An invitation is a single-use, time-limited credential that grants
//! membership in one group. Tokens are high-entropy and unique; an
//! invitation is redeemable iff it is active, unused and unexpired, a rule
//! the repository enforces in its queries.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Default invitation lifetime in days.
pub const DEFAULT_INVITE_TTL_DAYS: i64 = 7;

/// Computes the expiry for a freshly issued invitation.
pub fn invite_expiry(now: DateTime<Utc>, ttl_days: i64) -> DateTime<Utc> {
    now + Duration::days(ttl_days)
}

/// Response after issuing an invitation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct IssueInviteResponse {
    pub url: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Limited group info exposed on the public invite preview.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InviteGroupPreview {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub member_count: i64,
}

/// Public invite preview response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InvitePreviewResponse {
    pub group: InviteGroupPreview,
    pub expires_at: DateTime<Utc>,
}

/// Response after redeeming an invitation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RedeemInviteResponse {
    pub joined: bool,
    pub group_id: Uuid,
    /// True when the redeemer already belonged to the group; redemption is
    /// an idempotent upsert, not an error.
    pub already_member: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invite_expiry_default_ttl() {
        let now = Utc::now();
        let expiry = invite_expiry(now, DEFAULT_INVITE_TTL_DAYS);
        assert_eq!(expiry - now, Duration::days(7));
    }
}
