//! Group and membership domain models.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

lazy_static! {
    /// Slug shape: lowercase alphanumerics separated by single hyphens.
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap();
}

/// Role of a user within a group.
///
/// Groups are flat: there is exactly one owner (the creator) and any number
/// of plain members. Ownership counts as membership everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupRole {
    Owner,
    Member,
}

impl GroupRole {
    /// Whether this role may rename or delete the group.
    pub fn can_manage_group(&self) -> bool {
        matches!(self, GroupRole::Owner)
    }
}

impl std::fmt::Display for GroupRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupRole::Owner => write!(f, "owner"),
            GroupRole::Member => write!(f, "member"),
        }
    }
}

/// A private family/friends group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a group.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateGroupRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// Optional explicit slug; derived from the name when absent.
    #[validate(regex(
        path = *SLUG_REGEX,
        message = "Slug must contain only lowercase letters, digits and hyphens"
    ))]
    pub slug: Option<String>,
}

/// Request to rename a group or change its slug.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateGroupRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(regex(
        path = *SLUG_REGEX,
        message = "Slug must contain only lowercase letters, digits and hyphens"
    ))]
    pub slug: Option<String>,
}

impl UpdateGroupRequest {
    /// True when the request carries no field to update.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.slug.is_none()
    }
}

/// Pointer to a member's gift list, for group member listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MemberListRef {
    pub id: Uuid,
    pub title: String,
}

/// A group member with their gift-list pointer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MemberInfo {
    pub user_id: Uuid,
    pub name: Option<String>,
    pub role: GroupRole,
    pub list: Option<MemberListRef>,
}

/// Response for listing the caller's groups.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GroupSummary {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub owner_id: Uuid,
    pub member_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_management_rights() {
        assert!(GroupRole::Owner.can_manage_group());
        assert!(!GroupRole::Member.can_manage_group());
    }

    #[test]
    fn test_role_display() {
        assert_eq!(GroupRole::Owner.to_string(), "owner");
        assert_eq!(GroupRole::Member.to_string(), "member");
    }

    #[test]
    fn test_create_group_validation() {
        let req = CreateGroupRequest {
            name: "Famille".to_string(),
            slug: Some("famille-2025".to_string()),
        };
        assert!(req.validate().is_ok());

        let req = CreateGroupRequest {
            name: String::new(),
            slug: None,
        };
        assert!(req.validate().is_err());

        let req = CreateGroupRequest {
            name: "Famille".to_string(),
            slug: Some("Bad Slug!".to_string()),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_slug_regex_rejects_edge_hyphens() {
        assert!(!SLUG_REGEX.is_match("-abc"));
        assert!(!SLUG_REGEX.is_match("abc-"));
        assert!(SLUG_REGEX.is_match("a-b-c"));
    }

    #[test]
    fn test_update_group_empty_detection() {
        let req = UpdateGroupRequest {
            name: None,
            slug: None,
        };
        assert!(req.is_empty());
    }
}
