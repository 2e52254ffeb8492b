//! User repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::UserEntity;
use crate::metrics::QueryTimer;

/// Repository for user-related database operations.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Upsert a user row from a resolved gateway session.
    ///
    /// Users are provisioned on first login; the gateway-provided display
    /// name refreshes the row only when the row has none, so profile edits
    /// are not clobbered by stale gateway claims.
    pub async fn upsert_from_session(
        &self,
        user_id: Uuid,
        name: Option<&str>,
    ) -> Result<UserEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_user_from_session");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            INSERT INTO users (id, name)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET
                name = COALESCE(users.name, EXCLUDED.name),
                updated_at = NOW()
            RETURNING id, name, avatar_url, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_id");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, name, avatar_url, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update the caller's profile fields. Absent fields are left unchanged.
    pub async fn update_profile(
        &self,
        id: Uuid,
        name: Option<&str>,
        avatar_url: Option<&str>,
    ) -> Result<UserEntity, sqlx::Error> {
        let timer = QueryTimer::new("update_user_profile");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                avatar_url = COALESCE($3, avatar_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, avatar_url, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(avatar_url)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
