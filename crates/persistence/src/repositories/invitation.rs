//! Invitation repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{InvitationEntity, InvitationWithGroupEntity};
use crate::metrics::QueryTimer;

/// Result of a successful redemption.
#[derive(Debug, Clone)]
pub struct RedeemOutcome {
    pub group_id: Uuid,
    /// False when the redeemer already had a membership; redemption is an
    /// idempotent upsert, so this is informational, not an error.
    pub newly_joined: bool,
}

/// Repository for invitation-related database operations.
#[derive(Clone)]
pub struct InvitationRepository {
    pool: PgPool,
}

impl InvitationRepository {
    /// Creates a new InvitationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new invitation.
    pub async fn create_invitation(
        &self,
        token: &str,
        group_id: Uuid,
        created_by: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<InvitationEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_invitation");
        let result = sqlx::query_as::<_, InvitationEntity>(
            r#"
            INSERT INTO invitations (token, group_id, created_by, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, token, group_id, created_by, expires_at, active, used_at, used_by, created_at
            "#,
        )
        .bind(token)
        .bind(group_id)
        .bind(created_by)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a redeemable invitation by token, joined with group info for the
    /// public preview. Missing, inactive, used and expired tokens all come
    /// back as `None` so the caller cannot distinguish them.
    pub async fn find_redeemable_by_token(
        &self,
        token: &str,
    ) -> Result<Option<InvitationWithGroupEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_redeemable_invitation");
        let result = sqlx::query_as::<_, InvitationWithGroupEntity>(
            r#"
            SELECT
                i.group_id, i.expires_at,
                g.name AS group_name, g.slug AS group_slug,
                (SELECT COUNT(*) FROM memberships WHERE group_id = g.id) AS member_count
            FROM invitations i
            JOIN groups g ON g.id = i.group_id
            WHERE i.token = $1
              AND i.active = TRUE
              AND i.used_at IS NULL
              AND i.expires_at > NOW()
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Redeem an invitation: consume the token and join the group, atomically.
    ///
    /// The consume step is a conditional UPDATE guarded by the prior
    /// redeemable state, so of two concurrent redemptions exactly one
    /// observes a row; the loser gets `Ok(None)`. The membership insert is
    /// an ON CONFLICT upsert: redeeming into a group the user already
    /// belongs to consumes the token without erroring. Both effects commit
    /// together so a crash can never leave a spent-but-unjoined token or a
    /// joined-but-reusable one.
    pub async fn redeem(
        &self,
        token: &str,
        redeemer: Uuid,
    ) -> Result<Option<RedeemOutcome>, sqlx::Error> {
        let timer = QueryTimer::new("redeem_invitation");

        let mut tx = self.pool.begin().await?;

        let group_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE invitations
            SET active = FALSE, used_at = NOW(), used_by = $2
            WHERE token = $1
              AND active = TRUE
              AND used_at IS NULL
              AND expires_at > NOW()
            RETURNING group_id
            "#,
        )
        .bind(token)
        .bind(redeemer)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(group_id) = group_id else {
            tx.rollback().await?;
            timer.record();
            return Ok(None);
        };

        let inserted = sqlx::query(
            r#"
            INSERT INTO memberships (group_id, user_id, role)
            VALUES ($1, $2, 'member')
            ON CONFLICT (group_id, user_id) DO NOTHING
            "#,
        )
        .bind(group_id)
        .bind(redeemer)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(Some(RedeemOutcome {
            group_id,
            newly_joined: inserted.rows_affected() > 0,
        }))
    }

}

#[cfg(test)]
mod tests {
    // Note: InvitationRepository tests require a database connection and are
    // covered by integration tests (including the single-use race).
}
