//! Group repository: group CRUD, memberships, and the membership graph.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{GroupEntity, GroupWithCountEntity, MemberWithListEntity};
use crate::metrics::QueryTimer;

/// Repository for group-related database operations.
#[derive(Clone)]
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    /// Creates a new GroupRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new group and add the creator as owner.
    ///
    /// Both rows are created in one transaction so a group can never exist
    /// without its owner membership.
    pub async fn create_group(
        &self,
        name: &str,
        slug: &str,
        owner_id: Uuid,
    ) -> Result<GroupEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_group");

        let mut tx = self.pool.begin().await?;

        let group = sqlx::query_as::<_, GroupEntity>(
            r#"
            INSERT INTO groups (name, slug, owner_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, slug, owner_id, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(slug)
        .bind(owner_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO memberships (group_id, user_id, role)
            VALUES ($1, $2, 'owner')
            "#,
        )
        .bind(group.id)
        .bind(owner_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(group)
    }

    /// Find a group by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<GroupEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_group_by_id");
        let result = sqlx::query_as::<_, GroupEntity>(
            r#"
            SELECT id, name, slug, owner_id, created_at, updated_at
            FROM groups
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Check whether a slug is already taken by another group.
    pub async fn slug_taken(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("check_group_slug_taken");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM groups
                WHERE slug = $1 AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(slug)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Rename a group or change its slug. Absent fields are left unchanged.
    pub async fn update_group(
        &self,
        id: Uuid,
        name: Option<&str>,
        slug: Option<&str>,
    ) -> Result<GroupEntity, sqlx::Error> {
        let timer = QueryTimer::new("update_group");
        let result = sqlx::query_as::<_, GroupEntity>(
            r#"
            UPDATE groups
            SET name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, slug, owner_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(slug)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a group, cascading its memberships and invitations.
    ///
    /// Children go first, inside the same transaction, so a crash can never
    /// leave orphaned foreign references.
    pub async fn delete_group(&self, id: Uuid) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("delete_group");

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM invitations WHERE group_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM memberships WHERE group_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        timer.record();
        Ok(())
    }

    /// Find all groups a user belongs to (as owner or member), with counts.
    pub async fn find_user_groups(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<GroupWithCountEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_groups");
        let result = sqlx::query_as::<_, GroupWithCountEntity>(
            r#"
            SELECT
                g.id, g.name, g.slug, g.owner_id,
                (SELECT COUNT(*) FROM memberships WHERE group_id = g.id) AS member_count
            FROM groups g
            WHERE g.owner_id = $1
               OR EXISTS (
                   SELECT 1 FROM memberships m
                   WHERE m.group_id = g.id AND m.user_id = $1
               )
            ORDER BY g.created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Is the user a member of the group? Ownership counts as membership.
    pub async fn is_member(&self, group_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("check_is_member");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM groups g
                WHERE g.id = $1
                  AND (g.owner_id = $2 OR EXISTS (
                      SELECT 1 FROM memberships m
                      WHERE m.group_id = g.id AND m.user_id = $2
                  ))
            )
            "#,
        )
        .bind(group_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// The membership graph's core relation: do two users share a group?
    ///
    /// Connection is plain set intersection over each user's groups
    /// (ownership counts as membership). Deliberately non-transitive: a
    /// common third party in two different groups does not connect two
    /// users, so no closure is computed here.
    pub async fn shares_group(&self, user_a: Uuid, user_b: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("check_shares_group");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM groups g
                WHERE (g.owner_id = $1 OR EXISTS (
                          SELECT 1 FROM memberships m
                          WHERE m.group_id = g.id AND m.user_id = $1
                      ))
                  AND (g.owner_id = $2 OR EXISTS (
                          SELECT 1 FROM memberships m
                          WHERE m.group_id = g.id AND m.user_id = $2
                      ))
            )
            "#,
        )
        .bind(user_a)
        .bind(user_b)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List members of a group with their profile and gift-list pointer.
    pub async fn list_members(
        &self,
        group_id: Uuid,
    ) -> Result<Vec<MemberWithListEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_group_members");
        let result = sqlx::query_as::<_, MemberWithListEntity>(
            r#"
            SELECT
                u.id AS user_id,
                u.name AS user_name,
                m.role,
                l.id AS list_id,
                l.title AS list_title
            FROM memberships m
            JOIN users u ON u.id = m.user_id
            LEFT JOIN gift_lists l ON l.owner_id = u.id
            WHERE m.group_id = $1
            ORDER BY m.joined_at
            "#,
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// User IDs of everyone in a group (owner and members), for fan-out.
    pub async fn member_user_ids(&self, group_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
        let timer = QueryTimer::new("list_member_user_ids");
        let result = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT DISTINCT user_id FROM (
                SELECT owner_id AS user_id FROM groups WHERE id = $1
                UNION ALL
                SELECT user_id FROM memberships WHERE group_id = $1
            ) members
            "#,
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

}
