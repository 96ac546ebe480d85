use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use serde::Deserialize;

use crate::{
    adapters::http::{app_state::AppState, extractors::CurrentUser},
    app_error::AppResult,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/users", post(create_user).put(update_user))
}

#[derive(Deserialize)]
pub struct CredentialsPayload {
    pub email: String,
    pub password: String,
}

async fn create_user(
    State(app_state): State<AppState>,
    payload: Result<Json<CredentialsPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload?;

    let profile = app_state
        .user_use_cases
        .create_user(&payload.email, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(profile)))
}

/// Replace the caller's email and password.
async fn update_user(
    State(app_state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    payload: Result<Json<CredentialsPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload?;

    let profile = app_state
        .user_use_cases
        .update_credentials(user_id, &payload.email, &payload.password)
        .await?;

    Ok(Json(profile))
}
