use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::post,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    adapters::http::{app_state::AppState, extractors::WebhookCaller},
    app_error::AppResult,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/webhooks", post(handle_webhook))
}

#[derive(Deserialize)]
struct WebhookPayload {
    event: String,
    data: WebhookData,
}

#[derive(Deserialize)]
struct WebhookData {
    user_id: Uuid,
}

/// Payment provider callback. Unknown events are acknowledged and ignored so
/// the provider stops retrying them.
async fn handle_webhook(
    State(app_state): State<AppState>,
    _caller: WebhookCaller,
    payload: Result<Json<WebhookPayload>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Json(payload) = payload?;

    let outcome = app_state
        .user_use_cases
        .upgrade_from_webhook(&payload.event, payload.data.user_id)
        .await?;
    tracing::debug!(event = %payload.event, ?outcome, "Webhook handled");

    Ok(StatusCode::NO_CONTENT)
}
