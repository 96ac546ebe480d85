use std::fs::File;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    adapters::http::app_state::AppState,
    infra::{config::AppConfig, postgres_persistence},
    use_cases::{
        session::{RefreshTokenRepo, SessionUseCases},
        user::{UserRepo, UserUseCases},
    },
};

pub async fn init_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let postgres_arc = Arc::new(
        postgres_persistence(&config.database_url, config.db_max_connections).await?,
    );

    let user_repo_arc = postgres_arc.clone() as Arc<dyn UserRepo>;
    let refresh_token_repo_arc = postgres_arc.clone() as Arc<dyn RefreshTokenRepo>;

    let user_use_cases = UserUseCases::new(user_repo_arc.clone(), config.bcrypt_cost);

    let session_use_cases = SessionUseCases::new(
        user_repo_arc,
        refresh_token_repo_arc,
        config.jwt_secret.clone(),
        config.access_token_ttl,
        config.refresh_token_ttl,
        config.bcrypt_cost,
    )?;

    Ok(AppState {
        config: Arc::new(config),
        user_use_cases: Arc::new(user_use_cases),
        session_use_cases: Arc::new(session_use_cases),
    })
}

/// Console logs always; JSON logs too when `log_file` is set.
pub fn init_tracing(log_file: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "chirpy=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false) // don’t show target (module path)
        .with_level(true)
        .pretty();

    // File (structured JSON logs)
    let json_layer = log_file.and_then(|path| match File::create(path) {
        Ok(file) => Some(
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(true)
                .with_span_list(true)
                .boxed(),
        ),
        Err(e) => {
            eprintln!("cannot create log file {path}: {e}; logging to console only");
            None
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
}
