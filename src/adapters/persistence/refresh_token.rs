use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    domain::entities::refresh_token::RefreshToken,
    use_cases::session::RefreshTokenRepo,
};

#[derive(sqlx::FromRow, Debug)]
pub struct RefreshTokenDb {
    pub token: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl From<RefreshTokenDb> for RefreshToken {
    fn from(row: RefreshTokenDb) -> Self {
        RefreshToken {
            token: row.token,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            expires_at: row.expires_at,
            revoked_at: row.revoked_at,
        }
    }
}

#[async_trait]
impl RefreshTokenRepo for PostgresPersistence {
    async fn insert(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> AppResult<RefreshToken> {
        let rec = sqlx::query_as::<_, RefreshTokenDb>(
            r#"
                INSERT INTO refresh_tokens (token, created_at, updated_at, user_id, expires_at)
                VALUES ($1, NOW(), NOW(), $2, $3)
                RETURNING token, user_id, created_at, updated_at, expires_at, revoked_at
            "#,
        )
        .bind(token)
        .bind(user_id)
        .bind(expires_at)
        .fetch_one(self.pool())
        .await
        .map_err(AppError::from)?;
        Ok(rec.into())
    }

    async fn get_by_token(&self, token: &str) -> AppResult<Option<RefreshToken>> {
        let rec = sqlx::query_as::<_, RefreshTokenDb>(
            r#"
                SELECT token, user_id, created_at, updated_at, expires_at, revoked_at
                FROM refresh_tokens
                WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(self.pool())
        .await
        .map_err(AppError::from)?;
        Ok(rec.map(RefreshToken::from))
    }

    async fn revoke(&self, token: &str, revoked_at: DateTime<Utc>) -> AppResult<bool> {
        // Single-row update: the first revocation timestamp wins. An already
        // revoked row still counts as affected, so a repeated revoke succeeds.
        // `InMemoryRefreshTokenRepo::revoke` mirrors this and carries the tests.
        let result = sqlx::query(
            r#"
                UPDATE refresh_tokens
                SET revoked_at = COALESCE(revoked_at, $2),
                    updated_at = CASE WHEN revoked_at IS NULL THEN $2 ELSE updated_at END
                WHERE token = $1
            "#,
        )
        .bind(token)
        .bind(revoked_at)
        .execute(self.pool())
        .await
        .map_err(AppError::from)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at < $1")
            .bind(now)
            .execute(self.pool())
            .await
            .map_err(AppError::from)?;
        Ok(result.rows_affected())
    }
}
