//! Request guards for the two credential schemes the API accepts.

use axum::{extract::FromRequestParts, http::request::Parts};
use secrecy::ExposeSecret;
use uuid::Uuid;

use crate::{
    adapters::http::app_state::AppState,
    app_error::AppError,
    application::extract::{authorize_api_key, extract_api_key, extract_bearer},
};

/// The user behind a valid `Authorization: Bearer <access token>` header.
pub struct CurrentUser(pub Uuid);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer(&parts.headers)?;
        let user_id = state.session_use_cases.authenticate(token)?;
        Ok(CurrentUser(user_id))
    }
}

/// The raw bearer credential, for endpoints that take a refresh token.
pub struct BearerToken(pub String);

impl<S: Send + Sync> FromRequestParts<S> for BearerToken {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(BearerToken(extract_bearer(&parts.headers)?.to_owned()))
    }
}

/// Proof that the caller presented the payment provider's API key.
pub struct WebhookCaller;

impl FromRequestParts<AppState> for WebhookCaller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let key = extract_api_key(&parts.headers)?;
        authorize_api_key(key, state.config.polka_key.expose_secret())?;
        Ok(WebhookCaller)
    }
}
