//! Suggestion repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{IdeaEntity, SuggestionEntity};
use crate::metrics::QueryTimer;

/// Repository for suggestion-related database operations.
#[derive(Clone)]
pub struct SuggestionRepository {
    pool: PgPool,
}

impl SuggestionRepository {
    /// Creates a new SuggestionRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a suggestion by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<SuggestionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_suggestion_by_id");
        let result = sqlx::query_as::<_, SuggestionEntity>(
            r#"
            SELECT id, list_id, title, url, notes, price_cents, image,
                   created_by, status, created_at, updated_at
            FROM suggestions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List pending suggestions for a list, oldest first.
    pub async fn list_pending_for_list(
        &self,
        list_id: Uuid,
    ) -> Result<Vec<SuggestionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_pending_suggestions");
        let result = sqlx::query_as::<_, SuggestionEntity>(
            r#"
            SELECT id, list_id, title, url, notes, price_cents, image,
                   created_by, status, created_at, updated_at
            FROM suggestions
            WHERE list_id = $1 AND status = 'pending'
            ORDER BY created_at ASC
            "#,
        )
        .bind(list_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Insert a new pending suggestion.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_suggestion(
        &self,
        list_id: Uuid,
        created_by: Uuid,
        title: &str,
        url: Option<&str>,
        notes: Option<&str>,
        price_cents: Option<i64>,
        image: Option<&str>,
    ) -> Result<SuggestionEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_suggestion");
        let result = sqlx::query_as::<_, SuggestionEntity>(
            r#"
            INSERT INTO suggestions (list_id, title, url, notes, price_cents, image, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, list_id, title, url, notes, price_cents, image,
                      created_by, status, created_at, updated_at
            "#,
        )
        .bind(list_id)
        .bind(title)
        .bind(url)
        .bind(notes)
        .bind(price_cents)
        .bind(image)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Accept a pending suggestion, spawning an idea on its list.
    ///
    /// The status flip is guarded: UPDATE ... WHERE status = 'pending' wins
    /// for at most one caller, so two concurrent reviews cannot both spawn an
    /// idea. Returns None when the suggestion was already resolved.
    ///
    /// The spawned idea is attributed to `idea_author` (the list owner who
    /// accepted it) and is never hidden from the owner, who has necessarily
    /// seen it.
    pub async fn accept(
        &self,
        id: Uuid,
        idea_author: Uuid,
    ) -> Result<Option<(SuggestionEntity, IdeaEntity)>, sqlx::Error> {
        let timer = QueryTimer::new("accept_suggestion");

        let mut tx = self.pool.begin().await?;

        let suggestion = sqlx::query_as::<_, SuggestionEntity>(
            r#"
            UPDATE suggestions
            SET status = 'accepted', updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING id, list_id, title, url, notes, price_cents, image,
                      created_by, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(suggestion) = suggestion else {
            tx.rollback().await?;
            timer.record();
            return Ok(None);
        };

        let idea = sqlx::query_as::<_, IdeaEntity>(
            r#"
            INSERT INTO ideas (list_id, created_by, title, url, notes, price_cents, image, hidden_for_owner)
            VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE)
            RETURNING id, list_id, created_by, title, url, notes, price_cents, image,
                      hidden_for_owner, created_at, updated_at
            "#,
        )
        .bind(suggestion.list_id)
        .bind(idea_author)
        .bind(&suggestion.title)
        .bind(&suggestion.url)
        .bind(&suggestion.notes)
        .bind(suggestion.price_cents)
        .bind(&suggestion.image)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(Some((suggestion, idea)))
    }

    /// Reject a pending suggestion.
    ///
    /// Guarded the same way as accept; returns None when the suggestion was
    /// already resolved.
    pub async fn reject(&self, id: Uuid) -> Result<Option<SuggestionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("reject_suggestion");
        let result = sqlx::query_as::<_, SuggestionEntity>(
            r#"
            UPDATE suggestions
            SET status = 'rejected', updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING id, list_id, title, url, notes, price_cents, image,
                      created_by, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
