//! Group entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::GroupRole;
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for group_role that maps to the PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "group_role", rename_all = "lowercase")]
pub enum GroupRoleDb {
    Owner,
    Member,
}

impl From<GroupRoleDb> for GroupRole {
    fn from(db_role: GroupRoleDb) -> Self {
        match db_role {
            GroupRoleDb::Owner => GroupRole::Owner,
            GroupRoleDb::Member => GroupRole::Member,
        }
    }
}

impl From<GroupRole> for GroupRoleDb {
    fn from(role: GroupRole) -> Self {
        match role {
            GroupRole::Owner => GroupRoleDb::Owner,
            GroupRole::Member => GroupRoleDb::Member,
        }
    }
}

/// Database row mapping for the groups table.
#[derive(Debug, Clone, FromRow)]
pub struct GroupEntity {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GroupEntity> for domain::models::Group {
    fn from(entity: GroupEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            slug: entity.slug,
            owner_id: entity.owner_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Group joined with its membership count, for listings and invite previews.
#[derive(Debug, Clone, FromRow)]
pub struct GroupWithCountEntity {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub owner_id: Uuid,
    pub member_count: i64,
}

/// Membership joined with user profile and gift-list pointer.
#[derive(Debug, Clone, FromRow)]
pub struct MemberWithListEntity {
    pub user_id: Uuid,
    pub user_name: Option<String>,
    pub role: GroupRoleDb,
    pub list_id: Option<Uuid>,
    pub list_title: Option<String>,
}
