//! In-memory implementations of the credential store traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::{session::RefreshTokenRepo, user::UserRepo},
    domain::entities::{refresh_token::RefreshToken, user::User},
};

fn duplicate() -> AppError {
    AppError::InvalidInput("A record with this value already exists".into())
}

// ============================================================================
// InMemoryUserRepo
// ============================================================================

#[derive(Default)]
pub struct InMemoryUserRepo {
    pub users: Mutex<HashMap<Uuid, User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: Vec<User>) -> Self {
        let map: HashMap<Uuid, User> = users.into_iter().map(|u| (u.id, u)).collect();
        Self {
            users: Mutex::new(map),
        }
    }
}

#[async_trait]
impl UserRepo for InMemoryUserRepo {
    async fn create(&self, email: &str, hashed_password: &str) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == email) {
            return Err(duplicate());
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            email: email.to_string(),
            hashed_password: hashed_password.to_string(),
            is_chirpy_red: false,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn get_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(&user_id).cloned())
    }

    async fn update_credentials(
        &self,
        user_id: Uuid,
        email: &str,
        hashed_password: &str,
    ) -> AppResult<Option<User>> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == email && u.id != user_id) {
            return Err(duplicate());
        }
        let Some(user) = users.get_mut(&user_id) else {
            return Ok(None);
        };
        user.email = email.to_string();
        user.hashed_password = hashed_password.to_string();
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn set_chirpy_red(&self, user_id: Uuid, is_chirpy_red: bool) -> AppResult<bool> {
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.get_mut(&user_id) else {
            return Ok(false);
        };
        user.is_chirpy_red = is_chirpy_red;
        user.updated_at = Utc::now();
        Ok(true)
    }
}

// ============================================================================
// InMemoryRefreshTokenRepo
// ============================================================================

#[derive(Default)]
pub struct InMemoryRefreshTokenRepo {
    pub tokens: Mutex<HashMap<String, RefreshToken>>,
}

impl InMemoryRefreshTokenRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a row as-is, bypassing `insert`.
    pub fn put(&self, token: RefreshToken) {
        self.tokens
            .lock()
            .unwrap()
            .insert(token.token.clone(), token);
    }

    pub fn get(&self, token: &str) -> Option<RefreshToken> {
        self.tokens.lock().unwrap().get(token).cloned()
    }

    pub fn len(&self) -> usize {
        self.tokens.lock().unwrap().len()
    }
}

#[async_trait]
impl RefreshTokenRepo for InMemoryRefreshTokenRepo {
    async fn insert(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> AppResult<RefreshToken> {
        let mut tokens = self.tokens.lock().unwrap();
        if tokens.contains_key(token) {
            return Err(duplicate());
        }
        let now = Utc::now();
        let row = RefreshToken {
            token: token.to_string(),
            user_id,
            created_at: now,
            updated_at: now,
            expires_at,
            revoked_at: None,
        };
        tokens.insert(row.token.clone(), row.clone());
        Ok(row)
    }

    async fn get_by_token(&self, token: &str) -> AppResult<Option<RefreshToken>> {
        Ok(self.get(token))
    }

    // Same contract as the `COALESCE(revoked_at, $2)` update in the Postgres repo.
    async fn revoke(&self, token: &str, revoked_at: DateTime<Utc>) -> AppResult<bool> {
        let mut tokens = self.tokens.lock().unwrap();
        let Some(row) = tokens.get_mut(token) else {
            return Ok(false);
        };
        if row.revoked_at.is_none() {
            row.revoked_at = Some(revoked_at);
            row.updated_at = revoked_at;
        }
        Ok(true)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let mut tokens = self.tokens.lock().unwrap();
        let before = tokens.len();
        tokens.retain(|_, row| row.expires_at >= now);
        Ok((before - tokens.len()) as u64)
    }
}
