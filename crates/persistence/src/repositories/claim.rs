//! Claim repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::metrics::QueryTimer;

/// Repository for claim-related database operations.
#[derive(Clone)]
pub struct ClaimRepository {
    pool: PgPool,
}

impl ClaimRepository {
    /// Creates a new ClaimRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Whether the user currently holds a claim on the idea.
    pub async fn is_claimed_by(&self, idea_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("is_claimed_by");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM claims WHERE idea_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(idea_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Toggle the user's claim on an idea, returning the new claimed state.
    ///
    /// Insert-first: ON CONFLICT DO NOTHING means exactly one of two
    /// concurrent togglers lands the insert; the loser observes zero affected
    /// rows and takes the delete branch. No read-then-write window.
    pub async fn toggle(&self, idea_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("toggle_claim");

        let inserted = sqlx::query(
            r#"
            INSERT INTO claims (idea_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (idea_id, user_id) DO NOTHING
            "#,
        )
        .bind(idea_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if inserted.rows_affected() > 0 {
            timer.record();
            return Ok(true);
        }

        sqlx::query("DELETE FROM claims WHERE idea_id = $1 AND user_id = $2")
            .bind(idea_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        timer.record();
        Ok(false)
    }

    /// Number of claims currently held on an idea.
    pub async fn claim_count(&self, idea_id: Uuid) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("claim_count");
        let result = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM claims WHERE idea_id = $1",
        )
        .bind(idea_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
