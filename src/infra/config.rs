use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use env_helpers::{get_env, get_env_default};
use secrecy::SecretString;
use time::Duration;

use crate::application::password::DEFAULT_BCRYPT_COST;

pub struct AppConfig {
    pub jwt_secret: Arc<SecretString>,
    /// Shared secret presented by the payment provider's webhook (`ApiKey <key>`).
    pub polka_key: SecretString,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    pub bcrypt_cost: u32,
    pub cors_origin: HeaderValue,
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub db_max_connections: u32,
    /// Every request is aborted once it runs longer than this.
    pub request_timeout: std::time::Duration,
    /// Period of the expired refresh token sweep. `None` disables it.
    pub token_cleanup_interval: Option<std::time::Duration>,
    /// Optional path for structured JSON logs in addition to the console.
    pub log_file: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let jwt_secret = Arc::new(SecretString::new(get_env::<String>("JWT_SECRET").into()));
        let polka_key = SecretString::new(get_env::<String>("POLKA_KEY").into());

        let access_token_ttl_secs: i64 = get_env_default("ACCESS_TOKEN_TTL_SECS", 3_600);
        let refresh_token_ttl_days: i64 = get_env_default("REFRESH_TOKEN_TTL_DAYS", 60);
        let bcrypt_cost: u32 = get_env_default("BCRYPT_COST", DEFAULT_BCRYPT_COST);

        let cors_origin: HeaderValue =
            get_env_default("CORS_ORIGIN", String::from("http://localhost:3000"))
                .parse()
                .expect("CORS_ORIGIN must be a valid header value");

        let bind_addr: SocketAddr =
            get_env_default("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 8080)));
        let database_url: String = get_env("DATABASE_URL");
        let db_max_connections: u32 = get_env_default("DB_MAX_CONNECTIONS", 5);
        let request_timeout_secs: u64 = get_env_default("REQUEST_TIMEOUT_SECS", 30);
        // 0 keeps the sweep off; expired rows are then only rejected lazily.
        let token_cleanup_secs: u64 = get_env_default("REFRESH_TOKEN_CLEANUP_SECS", 0);
        let log_file = std::env::var("LOG_FILE").ok().filter(|s| !s.is_empty());

        Self {
            jwt_secret,
            polka_key,
            access_token_ttl: Duration::seconds(access_token_ttl_secs),
            refresh_token_ttl: Duration::days(refresh_token_ttl_days),
            bcrypt_cost,
            cors_origin,
            bind_addr,
            database_url,
            db_max_connections,
            request_timeout: std::time::Duration::from_secs(request_timeout_secs),
            token_cleanup_interval: (token_cleanup_secs > 0)
                .then(|| std::time::Duration::from_secs(token_cleanup_secs)),
            log_file,
        }
    }
}
