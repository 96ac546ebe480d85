//! Test app state builder for HTTP-level integration testing.
//!
//! `TestAppStateBuilder` wires the real use cases to in-memory repositories
//! so routes can be exercised with `axum_test::TestServer`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use secrecy::SecretString;
use time::Duration;

use crate::{
    adapters::http::app_state::AppState,
    domain::entities::{refresh_token::RefreshToken, user::User},
    infra::config::AppConfig,
    test_utils::{InMemoryRefreshTokenRepo, InMemoryUserRepo, TEST_BCRYPT_COST},
    use_cases::{session::SessionUseCases, user::UserUseCases},
};

pub const TEST_JWT_SECRET: &str = "test_jwt_secret_for_route_tests";
pub const TEST_POLKA_KEY: &str = "f271c81ff7084ee5b99a5091b42d486e";

/// Everything a route test needs: the state to mount and handles on the
/// repositories behind it for assertions.
pub struct TestApp {
    pub state: AppState,
    pub users: Arc<InMemoryUserRepo>,
    pub refresh_tokens: Arc<InMemoryRefreshTokenRepo>,
}

#[derive(Default)]
pub struct TestAppStateBuilder {
    users: Vec<User>,
    refresh_tokens: Vec<RefreshToken>,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.users.push(user);
        self
    }

    pub fn with_refresh_token(mut self, token: RefreshToken) -> Self {
        self.refresh_tokens.push(token);
        self
    }

    pub fn build(self) -> TestApp {
        let config = test_config();

        let users = Arc::new(InMemoryUserRepo::with_users(self.users));
        let refresh_tokens = Arc::new(InMemoryRefreshTokenRepo::new());
        for token in self.refresh_tokens {
            refresh_tokens.put(token);
        }

        let user_use_cases = UserUseCases::new(users.clone(), config.bcrypt_cost);
        let session_use_cases = SessionUseCases::new(
            users.clone(),
            refresh_tokens.clone(),
            config.jwt_secret.clone(),
            config.access_token_ttl,
            config.refresh_token_ttl,
            config.bcrypt_cost,
        )
        .unwrap();

        TestApp {
            state: AppState {
                config: Arc::new(config),
                user_use_cases: Arc::new(user_use_cases),
                session_use_cases: Arc::new(session_use_cases),
            },
            users,
            refresh_tokens,
        }
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        jwt_secret: Arc::new(SecretString::new(TEST_JWT_SECRET.into())),
        polka_key: SecretString::new(TEST_POLKA_KEY.into()),
        access_token_ttl: Duration::hours(1),
        refresh_token_ttl: Duration::days(60),
        bcrypt_cost: TEST_BCRYPT_COST,
        cors_origin: HeaderValue::from_static("http://localhost:3000"),
        bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        database_url: "postgres://unused".to_string(),
        db_max_connections: 1,
        request_timeout: std::time::Duration::from_secs(30),
        token_cleanup_interval: None,
        log_file: None,
    }
}
