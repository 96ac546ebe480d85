use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::SecretString;
use time::Duration;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult, AuthError},
    application::{jwt, password, refresh_token::generate as generate_refresh_token},
    domain::entities::{refresh_token::RefreshToken, user::UserProfile},
    use_cases::user::UserRepo,
};

#[async_trait]
pub trait RefreshTokenRepo: Send + Sync {
    async fn insert(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> AppResult<RefreshToken>;
    async fn get_by_token(&self, token: &str) -> AppResult<Option<RefreshToken>>;
    /// Stamps `revoked_at` unless it is already set. Returns `false` when no
    /// row has this token.
    async fn revoke(&self, token: &str, revoked_at: DateTime<Utc>) -> AppResult<bool>;
    /// Deletes rows whose expiry is before `now`. Returns the number removed.
    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64>;
}

/// Everything a client receives after a successful login.
#[derive(Debug, Clone)]
pub struct LoginSession {
    pub user: UserProfile,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Clone)]
pub struct SessionUseCases {
    users: Arc<dyn UserRepo>,
    refresh_tokens: Arc<dyn RefreshTokenRepo>,
    jwt_secret: Arc<SecretString>,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
    /// Verified against when the email is unknown, so both login failures
    /// cost one bcrypt check at the configured cost.
    dummy_hash: String,
}

impl SessionUseCases {
    pub fn new(
        users: Arc<dyn UserRepo>,
        refresh_tokens: Arc<dyn RefreshTokenRepo>,
        jwt_secret: Arc<SecretString>,
        access_token_ttl: Duration,
        refresh_token_ttl: Duration,
        bcrypt_cost: u32,
    ) -> AppResult<Self> {
        let dummy_hash = password::hash_password(&generate_refresh_token()?, bcrypt_cost)?;
        Ok(Self {
            users,
            refresh_tokens,
            jwt_secret,
            access_token_ttl,
            refresh_token_ttl,
            dummy_hash,
        })
    }

    /// Exchange email and password for an access token and a fresh refresh
    /// token. The only place refresh tokens are minted.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginSession> {
        let user = self.users.get_by_email(email.trim()).await?;

        let candidate = password.to_owned();
        let hashed = user
            .as_ref()
            .map_or_else(|| self.dummy_hash.clone(), |u| u.hashed_password.clone());
        let verified =
            tokio::task::spawn_blocking(move || password::verify_password(&candidate, &hashed))
                .await
                .map_err(|e| AppError::Internal(format!("password verify task: {e}")))?;

        let Some(user) = user else {
            tracing::info!("Login rejected: unknown email");
            return Err(AuthError::UserNotFound.into());
        };
        verified
            .inspect_err(|_| tracing::info!(user_id = %user.id, "Login rejected: wrong password"))?;

        let access_token = jwt::issue(user.id, &self.jwt_secret, self.access_token_ttl)?;
        let refresh_token = generate_refresh_token()?;
        let expires_at = Utc::now() + chrono::Duration::seconds(self.refresh_token_ttl.whole_seconds());

        // Nothing is handed out unless the refresh token row committed.
        self.refresh_tokens
            .insert(&refresh_token, user.id, expires_at)
            .await?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(LoginSession {
            user: user.into(),
            access_token,
            refresh_token,
        })
    }

    /// Mint a new access token from a stored refresh token. The refresh token
    /// itself is not rotated.
    #[instrument(skip_all)]
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<String> {
        let stored = self
            .refresh_tokens
            .get_by_token(refresh_token)
            .await?
            .ok_or(AuthError::TokenNotFound)?;

        if !stored.is_usable_at(Utc::now()) {
            tracing::info!(user_id = %stored.user_id, "Refresh rejected: token expired or revoked");
            return Err(AuthError::TokenExpiredOrRevoked.into());
        }

        let Some(user) = self.users.get_by_id(stored.user_id).await? else {
            tracing::warn!(user_id = %stored.user_id, "Refresh token owner no longer exists");
            return Err(AuthError::TokenNotFound.into());
        };

        jwt::issue(user.id, &self.jwt_secret, self.access_token_ttl)
    }

    /// Revoke a refresh token. Revoking an already revoked token succeeds; a
    /// token that never existed is an error.
    #[instrument(skip_all)]
    pub async fn revoke(&self, refresh_token: &str) -> AppResult<()> {
        if !self.refresh_tokens.revoke(refresh_token, Utc::now()).await? {
            return Err(AuthError::TokenNotFound.into());
        }
        Ok(())
    }

    /// Resolve the user behind an access token.
    pub fn authenticate(&self, access_token: &str) -> AppResult<Uuid> {
        jwt::validate(access_token, &self.jwt_secret).map_err(AppError::from)
    }

    /// Drop refresh token rows that are past their expiry. Never called on the
    /// request path.
    #[instrument(skip(self))]
    pub async fn purge_expired(&self) -> AppResult<u64> {
        self.refresh_tokens.delete_expired(Utc::now()).await
    }
}
