//! Gift list repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::GiftListEntity;
use crate::metrics::QueryTimer;

/// Repository for gift-list-related database operations.
#[derive(Clone)]
pub struct GiftListRepository {
    pool: PgPool,
}

impl GiftListRepository {
    /// Creates a new GiftListRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a list by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<GiftListEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_list_by_id");
        let result = sqlx::query_as::<_, GiftListEntity>(
            r#"
            SELECT id, owner_id, title, description, created_at, updated_at
            FROM gift_lists
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Get the owner's list, provisioning it lazily on first access.
    ///
    /// The insert races safely against itself: ON CONFLICT DO NOTHING plus a
    /// follow-up select means two concurrent first accesses both observe the
    /// single list the unique owner_id constraint allows.
    pub async fn find_or_create_for_owner(
        &self,
        owner_id: Uuid,
        default_title: &str,
        default_description: &str,
    ) -> Result<GiftListEntity, sqlx::Error> {
        let timer = QueryTimer::new("find_or_create_list");

        sqlx::query(
            r#"
            INSERT INTO gift_lists (owner_id, title, description)
            VALUES ($1, $2, $3)
            ON CONFLICT (owner_id) DO NOTHING
            "#,
        )
        .bind(owner_id)
        .bind(default_title)
        .bind(default_description)
        .execute(&self.pool)
        .await?;

        let result = sqlx::query_as::<_, GiftListEntity>(
            r#"
            SELECT id, owner_id, title, description, created_at, updated_at
            FROM gift_lists
            WHERE owner_id = $1
            "#,
        )
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Rename a list or change its description. Absent fields are unchanged.
    pub async fn update_list(
        &self,
        id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<GiftListEntity, sqlx::Error> {
        let timer = QueryTimer::new("update_list");
        let result = sqlx::query_as::<_, GiftListEntity>(
            r#"
            UPDATE gift_lists
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, owner_id, title, description, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a list, cascading claims, ideas and suggestions.
    ///
    /// Children first, one transaction: claims reference ideas, ideas and
    /// suggestions reference the list.
    pub async fn delete_list(&self, id: Uuid) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("delete_list");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM claims
            WHERE idea_id IN (SELECT id FROM ideas WHERE list_id = $1)
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM ideas WHERE list_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM suggestions WHERE list_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM gift_lists WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        timer.record();
        Ok(())
    }
}
