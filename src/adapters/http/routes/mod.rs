pub mod auth;
pub mod user;
pub mod webhook;

use axum::{Router, routing::get};

use crate::adapters::http::app_state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(healthz))
        .merge(user::router())
        .merge(auth::router())
        .nest("/polka", webhook::router())
}

async fn healthz() -> &'static str {
    "OK"
}
