//! Invitation entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the invitations table.
#[derive(Debug, Clone, FromRow)]
pub struct InvitationEntity {
    pub id: Uuid,
    pub token: String,
    pub group_id: Uuid,
    pub created_by: Uuid,
    pub expires_at: DateTime<Utc>,
    pub active: bool,
    pub used_at: Option<DateTime<Utc>>,
    pub used_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Invitation joined with group info (for the public preview).
#[derive(Debug, Clone, FromRow)]
pub struct InvitationWithGroupEntity {
    pub group_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub group_name: String,
    pub group_slug: String,
    pub member_count: i64,
}
