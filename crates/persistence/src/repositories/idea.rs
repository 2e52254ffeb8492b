//! Idea repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{IdeaEntity, IdeaWithClaimCountEntity};
use crate::metrics::QueryTimer;

/// Repository for idea-related database operations.
#[derive(Clone)]
pub struct IdeaRepository {
    pool: PgPool,
}

impl IdeaRepository {
    /// Creates a new IdeaRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an idea by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<IdeaEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_idea_by_id");
        let result = sqlx::query_as::<_, IdeaEntity>(
            r#"
            SELECT id, list_id, created_by, title, url, notes, price_cents, image,
                   hidden_for_owner, created_at, updated_at
            FROM ideas
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List ideas on a list with their claim counts, newest first.
    ///
    /// When `include_hidden` is false, rows flagged hidden_for_owner are
    /// filtered out in SQL so the owner never receives them.
    pub async fn list_for_list(
        &self,
        list_id: Uuid,
        include_hidden: bool,
    ) -> Result<Vec<IdeaWithClaimCountEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_ideas_for_list");
        let result = sqlx::query_as::<_, IdeaWithClaimCountEntity>(
            r#"
            SELECT i.id, i.list_id, i.created_by, i.title, i.url, i.notes,
                   i.price_cents, i.image, i.hidden_for_owner,
                   i.created_at, i.updated_at,
                   COUNT(c.user_id) AS claim_count
            FROM ideas i
            LEFT JOIN claims c ON c.idea_id = i.id
            WHERE i.list_id = $1
              AND ($2 OR NOT i.hidden_for_owner)
            GROUP BY i.id
            ORDER BY i.created_at DESC
            "#,
        )
        .bind(list_id)
        .bind(include_hidden)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Insert a new idea.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_idea(
        &self,
        list_id: Uuid,
        created_by: Uuid,
        title: &str,
        url: Option<&str>,
        notes: Option<&str>,
        price_cents: Option<i64>,
        image: Option<&str>,
        hidden_for_owner: bool,
    ) -> Result<IdeaEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_idea");
        let result = sqlx::query_as::<_, IdeaEntity>(
            r#"
            INSERT INTO ideas (list_id, created_by, title, url, notes, price_cents, image, hidden_for_owner)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, list_id, created_by, title, url, notes, price_cents, image,
                      hidden_for_owner, created_at, updated_at
            "#,
        )
        .bind(list_id)
        .bind(created_by)
        .bind(title)
        .bind(url)
        .bind(notes)
        .bind(price_cents)
        .bind(image)
        .bind(hidden_for_owner)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update an idea. Absent fields are unchanged.
    pub async fn update_idea(
        &self,
        id: Uuid,
        title: Option<&str>,
        url: Option<&str>,
        notes: Option<&str>,
        price_cents: Option<i64>,
        image: Option<&str>,
    ) -> Result<IdeaEntity, sqlx::Error> {
        let timer = QueryTimer::new("update_idea");
        let result = sqlx::query_as::<_, IdeaEntity>(
            r#"
            UPDATE ideas
            SET title = COALESCE($2, title),
                url = COALESCE($3, url),
                notes = COALESCE($4, notes),
                price_cents = COALESCE($5, price_cents),
                image = COALESCE($6, image),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, list_id, created_by, title, url, notes, price_cents, image,
                      hidden_for_owner, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(url)
        .bind(notes)
        .bind(price_cents)
        .bind(image)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete an idea and its claims in one transaction.
    pub async fn delete_idea(&self, id: Uuid) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("delete_idea");

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM claims WHERE idea_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM ideas WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        timer.record();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    // Note: IdeaRepository tests require a database connection and are
    // covered by integration tests.
}
