use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use serde::Serialize;

use crate::{
    adapters::http::{
        app_state::AppState, extractors::BearerToken, routes::user::CredentialsPayload,
    },
    app_error::AppResult,
    domain::entities::user::UserProfile,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/revoke", post(revoke))
}

#[derive(Serialize)]
struct LoginResponse {
    #[serde(flatten)]
    user: UserProfile,
    token: String,
    refresh_token: String,
}

#[derive(Serialize)]
struct RefreshResponse {
    token: String,
}

async fn login(
    State(app_state): State<AppState>,
    payload: Result<Json<CredentialsPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload?;

    let session = app_state
        .session_use_cases
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(LoginResponse {
        user: session.user,
        token: session.access_token,
        refresh_token: session.refresh_token,
    }))
}

async fn refresh(
    State(app_state): State<AppState>,
    BearerToken(refresh_token): BearerToken,
) -> AppResult<impl IntoResponse> {
    let token = app_state.session_use_cases.refresh(&refresh_token).await?;
    Ok(Json(RefreshResponse { token }))
}

async fn revoke(
    State(app_state): State<AppState>,
    BearerToken(refresh_token): BearerToken,
) -> AppResult<StatusCode> {
    app_state.session_use_cases.revoke(&refresh_token).await?;
    Ok(StatusCode::NO_CONTENT)
}
