//! Test data factories for creating valid test fixtures.
//!
//! Each factory function creates a complete, valid object with sensible defaults.
//! Use the closure parameter to override specific fields as needed.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::{
    application::password,
    domain::entities::{refresh_token::RefreshToken, user::User},
};

/// Plaintext password behind every user built by [`create_test_user`].
pub const TEST_PASSWORD: &str = "hunter2-but-longer";

/// bcrypt's minimum cost, so hashing in tests stays cheap.
pub const TEST_BCRYPT_COST: u32 = 4;

/// Create a test user whose password is [`TEST_PASSWORD`].
pub fn create_test_user(overrides: impl FnOnce(&mut User)) -> User {
    let now = test_datetime();
    let mut user = User {
        id: Uuid::new_v4(),
        created_at: now,
        updated_at: now,
        email: format!("user-{}@example.com", Uuid::new_v4().simple()),
        hashed_password: password::hash_password(TEST_PASSWORD, TEST_BCRYPT_COST).unwrap(),
        is_chirpy_red: false,
    };
    overrides(&mut user);
    user
}

/// Create a live refresh token for `user_id` that expires in 60 days.
pub fn create_test_refresh_token(
    user_id: Uuid,
    overrides: impl FnOnce(&mut RefreshToken),
) -> RefreshToken {
    let now = Utc::now();
    let mut token = RefreshToken {
        token: hex::encode(Uuid::new_v4().as_bytes()),
        user_id,
        created_at: now,
        updated_at: now,
        expires_at: now + Duration::days(60),
        revoked_at: None,
    };
    overrides(&mut token);
    token
}

/// A fixed point in the past, used for created/updated timestamps.
pub fn test_datetime() -> DateTime<Utc> {
    DateTime::from_timestamp(1_735_689_600, 0).unwrap()
}
