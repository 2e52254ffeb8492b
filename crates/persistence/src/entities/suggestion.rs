//! Suggestion entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::SuggestionStatus;
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for suggestion_status that maps to the PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "suggestion_status", rename_all = "lowercase")]
pub enum SuggestionStatusDb {
    Pending,
    Accepted,
    Rejected,
}

impl From<SuggestionStatusDb> for SuggestionStatus {
    fn from(db_status: SuggestionStatusDb) -> Self {
        match db_status {
            SuggestionStatusDb::Pending => SuggestionStatus::Pending,
            SuggestionStatusDb::Accepted => SuggestionStatus::Accepted,
            SuggestionStatusDb::Rejected => SuggestionStatus::Rejected,
        }
    }
}

impl From<SuggestionStatus> for SuggestionStatusDb {
    fn from(status: SuggestionStatus) -> Self {
        match status {
            SuggestionStatus::Pending => SuggestionStatusDb::Pending,
            SuggestionStatus::Accepted => SuggestionStatusDb::Accepted,
            SuggestionStatus::Rejected => SuggestionStatusDb::Rejected,
        }
    }
}

/// Database row mapping for the suggestions table.
#[derive(Debug, Clone, FromRow)]
pub struct SuggestionEntity {
    pub id: Uuid,
    pub list_id: Uuid,
    pub title: String,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub price_cents: Option<i64>,
    pub image: Option<String>,
    pub created_by: Uuid,
    pub status: SuggestionStatusDb,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SuggestionEntity> for domain::models::Suggestion {
    fn from(entity: SuggestionEntity) -> Self {
        Self {
            id: entity.id,
            list_id: entity.list_id,
            title: entity.title,
            url: entity.url,
            notes: entity.notes,
            price_cents: entity.price_cents,
            image: entity.image,
            created_by: entity.created_by,
            status: entity.status.into(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
