//! Idea domain models.
//!
//! `hidden_for_owner = true` marks an idea added directly by a connected
//! non-owner (a surprise entry). Only non-owner-authored ideas may carry the
//! flag, and the list's owner never sees such ideas in listings while every
//! other connected user does.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request to add an idea to a list.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateIdeaRequest {
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

/// Request to update an idea (owner only).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateIdeaRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(url(message = "url must be a valid URL"))]
    pub url: Option<String>,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,

    #[validate(range(min = 0, message = "Price must be non-negative"))]
    pub price_cents: Option<i64>,

    #[validate(url(message = "image must be a valid URL"))]
    pub image: Option<String>,
}

impl UpdateIdeaRequest {
    /// True when the request carries no field to update.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.url.is_none()
            && self.notes.is_none()
            && self.price_cents.is_none()
            && self.image.is_none()
    }
}

/// An idea as returned by listing queries.
///
/// Claim counts are visible to everyone; claimant identity is not serialized
/// anywhere, so the owner can see interest without learning who.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct IdeaResponse {
    pub id: Uuid,
    pub list_id: Uuid,
    pub title: String,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub price_cents: Option<i64>,
    pub image: Option<String>,
    pub hidden_for_owner: bool,
    pub claim_count: i64,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_idea_validation() {
        let req = CreateIdeaRequest {
            list_id: Uuid::new_v4(),
            title: "Socks".to_string(),
            url: Some("https://example.com/socks".to_string()),
            notes: None,
            price_cents: Some(1299),
            image: None,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_idea_rejects_empty_title() {
        let req = CreateIdeaRequest {
            list_id: Uuid::new_v4(),
            title: String::new(),
            url: None,
            notes: None,
            price_cents: None,
            image: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_idea_rejects_negative_price() {
        let req = CreateIdeaRequest {
            list_id: Uuid::new_v4(),
            title: "Socks".to_string(),
            url: None,
            notes: None,
            price_cents: Some(-5),
            image: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_idea_empty_detection() {
        let req = UpdateIdeaRequest {
            title: None,
            url: None,
            notes: None,
            price_cents: None,
            image: None,
        };
        assert!(req.is_empty());

        let req = UpdateIdeaRequest {
            title: Some("Warm socks".to_string()),
            url: None,
            notes: None,
            price_cents: None,
            image: None,
        };
        assert!(!req.is_empty());
    }
}
