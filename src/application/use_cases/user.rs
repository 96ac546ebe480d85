use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::{password, validators::is_valid_email},
    domain::entities::user::{User, UserProfile},
};

/// Webhook event that grants the upgrade flag. Every other event is ignored.
pub const USER_UPGRADED_EVENT: &str = "user.upgraded";

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn create(&self, email: &str, hashed_password: &str) -> AppResult<User>;
    async fn get_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn get_by_id(&self, user_id: Uuid) -> AppResult<Option<User>>;
    /// Returns `None` when no user has this id.
    async fn update_credentials(
        &self,
        user_id: Uuid,
        email: &str,
        hashed_password: &str,
    ) -> AppResult<Option<User>>;
    /// Returns `false` when no user has this id.
    async fn set_chirpy_red(&self, user_id: Uuid, is_chirpy_red: bool) -> AppResult<bool>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    Upgraded,
    Ignored,
}

#[derive(Clone)]
pub struct UserUseCases {
    repo: Arc<dyn UserRepo>,
    bcrypt_cost: u32,
}

impl UserUseCases {
    pub fn new(repo: Arc<dyn UserRepo>, bcrypt_cost: u32) -> Self {
        Self { repo, bcrypt_cost }
    }

    #[instrument(skip(self, password))]
    pub async fn create_user(&self, email: &str, password: &str) -> AppResult<UserProfile> {
        let email = validated_email(email, password)?;
        let hashed = hash_blocking(password, self.bcrypt_cost).await?;
        let user = self.repo.create(email, &hashed).await?;
        tracing::info!(user_id = %user.id, "User created");
        Ok(user.into())
    }

    #[instrument(skip(self, password))]
    pub async fn update_credentials(
        &self,
        user_id: Uuid,
        email: &str,
        password: &str,
    ) -> AppResult<UserProfile> {
        let email = validated_email(email, password)?;
        let hashed = hash_blocking(password, self.bcrypt_cost).await?;
        let user = self
            .repo
            .update_credentials(user_id, email, &hashed)
            .await?
            .ok_or(AppError::NotFound)?;
        Ok(user.into())
    }

    #[instrument(skip(self))]
    pub async fn upgrade_from_webhook(
        &self,
        event: &str,
        user_id: Uuid,
    ) -> AppResult<WebhookOutcome> {
        if event != USER_UPGRADED_EVENT {
            return Ok(WebhookOutcome::Ignored);
        }
        if !self.repo.set_chirpy_red(user_id, true).await? {
            return Err(AppError::NotFound);
        }
        tracing::info!(%user_id, "User upgraded");
        Ok(WebhookOutcome::Upgraded)
    }
}

fn validated_email<'a>(email: &'a str, password: &str) -> AppResult<&'a str> {
    let email = email.trim();
    if !is_valid_email(email) {
        return Err(AppError::InvalidInput("Invalid email format".into()));
    }
    if password.is_empty() {
        return Err(AppError::InvalidInput("Password must not be empty".into()));
    }
    Ok(email)
}

/// bcrypt is deliberately slow; keep it off the async workers.
async fn hash_blocking(password: &str, cost: u32) -> AppResult<String> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || password::hash_password(&password, cost))
        .await
        .map_err(|e| AppError::Internal(format!("password hash task: {e}")))?
}
