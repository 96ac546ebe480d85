use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    domain::entities::user::User,
    use_cases::user::UserRepo,
};

// User struct as stored in the db.
#[derive(sqlx::FromRow, Debug)]
pub struct UserDb {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    pub hashed_password: String,
    pub is_chirpy_red: bool,
}

impl From<UserDb> for User {
    fn from(row: UserDb) -> Self {
        User {
            id: row.id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            email: row.email,
            hashed_password: row.hashed_password,
            is_chirpy_red: row.is_chirpy_red,
        }
    }
}

const USER_COLUMNS: &str = "id, created_at, updated_at, email, hashed_password, is_chirpy_red";

#[async_trait]
impl UserRepo for PostgresPersistence {
    async fn create(&self, email: &str, hashed_password: &str) -> AppResult<User> {
        let rec = sqlx::query_as::<_, UserDb>(&format!(
            r#"
                INSERT INTO users (id, created_at, updated_at, email, hashed_password)
                VALUES ($1, NOW(), NOW(), $2, $3)
                RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(hashed_password)
        .fetch_one(self.pool())
        .await
        .map_err(AppError::from)?;
        Ok(rec.into())
    }

    async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let rec = sqlx::query_as::<_, UserDb>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(self.pool())
        .await
        .map_err(AppError::from)?;
        Ok(rec.map(User::from))
    }

    async fn get_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let rec = sqlx::query_as::<_, UserDb>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id)
        .fetch_optional(self.pool())
        .await
        .map_err(AppError::from)?;
        Ok(rec.map(User::from))
    }

    async fn update_credentials(
        &self,
        user_id: Uuid,
        email: &str,
        hashed_password: &str,
    ) -> AppResult<Option<User>> {
        let rec = sqlx::query_as::<_, UserDb>(&format!(
            r#"
                UPDATE users
                SET email = $2, hashed_password = $3, updated_at = NOW()
                WHERE id = $1
                RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(email)
        .bind(hashed_password)
        .fetch_optional(self.pool())
        .await
        .map_err(AppError::from)?;
        Ok(rec.map(User::from))
    }

    async fn set_chirpy_red(&self, user_id: Uuid, is_chirpy_red: bool) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE users SET is_chirpy_red = $2, updated_at = NOW() WHERE id = $1")
                .bind(user_id)
                .bind(is_chirpy_red)
                .execute(self.pool())
                .await
                .map_err(AppError::from)?;
        Ok(result.rows_affected() > 0)
    }
}
