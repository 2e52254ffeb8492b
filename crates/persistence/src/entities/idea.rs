//! Idea entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the ideas table.
#[derive(Debug, Clone, FromRow)]
pub struct IdeaEntity {
    pub id: Uuid,
    pub list_id: Uuid,
    pub title: String,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub price_cents: Option<i64>,
    pub image: Option<String>,
    pub created_by: Uuid,
    pub hidden_for_owner: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Idea joined with its claim count, for listing queries.
#[derive(Debug, Clone, FromRow)]
pub struct IdeaWithClaimCountEntity {
    pub id: Uuid,
    pub list_id: Uuid,
    pub title: String,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub price_cents: Option<i64>,
    pub image: Option<String>,
    pub created_by: Uuid,
    pub hidden_for_owner: bool,
    pub claim_count: i64,
    pub created_at: DateTime<Utc>,
}

impl From<IdeaWithClaimCountEntity> for domain::models::IdeaResponse {
    fn from(entity: IdeaWithClaimCountEntity) -> Self {
        Self {
            id: entity.id,
            list_id: entity.list_id,
            title: entity.title,
            url: entity.url,
            notes: entity.notes,
            price_cents: entity.price_cents,
            image: entity.image,
            hidden_for_owner: entity.hidden_for_owner,
            claim_count: entity.claim_count,
            created_at: entity.created_at,
        }
    }
}
