use dotenvy::dotenv;
use tracing::info;

use chirpy::infra::{
    InfraError,
    app::create_app,
    config::AppConfig,
    setup::{init_app_state, init_tracing},
    token_cleanup::run_refresh_token_cleanup_loop,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(config.log_file.as_deref());

    let app_state = init_app_state(config).await?;

    let bind_addr = app_state.config.bind_addr;

    if let Some(every) = app_state.config.token_cleanup_interval {
        let session_use_cases = app_state.session_use_cases.clone();
        tokio::spawn(async move {
            run_refresh_token_cleanup_loop(session_use_cases, every).await;
        });
    }

    let app = create_app(app_state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(InfraError::TcpBind)?;

    info!("Backend listening at {}", &listener.local_addr()?);

    axum::serve(listener, app)
        .await
        .map_err(InfraError::Server)?;

    Ok(())
}
