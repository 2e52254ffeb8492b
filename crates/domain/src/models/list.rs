//! Gift list domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A user's personal wish list. One per user, provisioned lazily on first
/// access.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GiftList {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Default title for a lazily provisioned list.
pub fn default_list_title(owner_name: Option<&str>) -> String {
    match owner_name {
        Some(name) => format!("🎁 {}'s wishlist", name),
        None => "🎁 My wishlist".to_string(),
    }
}

/// Request to rename a list or change its description.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateListRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
}

impl UpdateListRequest {
    /// True when the request carries no field to update.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_title_with_name() {
        assert_eq!(default_list_title(Some("Alice")), "🎁 Alice's wishlist");
    }

    #[test]
    fn test_default_title_without_name() {
        assert_eq!(default_list_title(None), "🎁 My wishlist");
    }

    #[test]
    fn test_update_list_validation() {
        let req = UpdateListRequest {
            title: Some(String::new()),
            description: None,
        };
        assert!(req.validate().is_err());

        let req = UpdateListRequest {
            title: Some("Birthday".to_string()),
            description: Some("short".to_string()),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_update_list_empty_detection() {
        let req = UpdateListRequest {
            title: None,
            description: None,
        };
        assert!(req.is_empty());
    }
}
