//! Gift list entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the gift_lists table.
#[derive(Debug, Clone, FromRow)]
pub struct GiftListEntity {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GiftListEntity> for domain::models::GiftList {
    fn from(entity: GiftListEntity) -> Self {
        Self {
            id: entity.id,
            owner_id: entity.owner_id,
            title: entity.title,
            description: entity.description,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
