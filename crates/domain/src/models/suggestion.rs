//! Suggestion domain models.
//!
//! A suggestion is a proposed idea submitted by a connected non-owner,
//! awaiting the list owner's review. Accepting spawns a real Idea; both
//! terminal states are immutable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Review state of a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionStatus {
    Pending,
    Accepted,
    Rejected,
}

impl SuggestionStatus {
    /// Terminal states can never transition again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SuggestionStatus::Accepted | SuggestionStatus::Rejected)
    }
}

impl std::fmt::Display for SuggestionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuggestionStatus::Pending => write!(f, "pending"),
            SuggestionStatus::Accepted => write!(f, "accepted"),
            SuggestionStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// A gift suggestion on someone else's list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Suggestion {
    pub id: Uuid,
    pub list_id: Uuid,
    pub title: String,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub price_cents: Option<i64>,
    pub image: Option<String>,
    /// The suggester. Never the list owner.
    pub created_by: Uuid,
    pub status: SuggestionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to suggest an idea to someone else's list.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateSuggestionRequest {
    pub list_id: Uuid,

    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(url(message = "url must be a valid URL"))]
    pub url: Option<String>,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,

    #[validate(range(min = 0, message = "Price must be non-negative"))]
    pub price_cents: Option<i64>,

    #[validate(url(message = "image must be a valid URL"))]
    pub image: Option<String>,
}

/// Owner's decision on a pending suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewAction {
    Accept,
    Reject,
}

/// Request to review a suggestion.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ReviewSuggestionRequest {
    pub action: ReviewAction,
}

/// Outcome of a review.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ReviewSuggestionResponse {
    pub suggestion_id: Uuid,
    pub status: SuggestionStatus,
    /// Set when the review accepted the suggestion and spawned an idea.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idea_id: Option<Uuid>,
}
