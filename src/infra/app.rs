use axum::{Router, http};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use tower_http::{
    cors::CorsLayer, set_header::SetResponseHeaderLayer, timeout::TimeoutLayer,
    trace::TraceLayer,
};
use uuid::Uuid;

use crate::adapters::{self, http::app_state::AppState};

pub fn create_app(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(app_state.config.cors_origin.clone())
        .allow_methods([http::Method::GET, http::Method::POST, http::Method::PUT])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true);

    let request_timeout = app_state.config.request_timeout;

    Router::new()
        .nest("/api", adapters::http::routes::router())
        .with_state(app_state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors)
        .layer(SetResponseHeaderLayer::if_not_present(
            http::header::X_CONTENT_TYPE_OPTIONS,
            http::HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            http::header::X_FRAME_OPTIONS,
            http::HeaderValue::from_static("DENY"),
        ))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &http::Request<_>| {
                let request_id = Uuid::new_v4();
                tracing::info_span!(
                    "http-request",
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                    request_id = %request_id
                )
            }),
        )
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;

    use super::*;
    use crate::test_utils::TestAppStateBuilder;

    #[tokio::test]
    async fn test_routes_are_mounted_under_api_with_security_headers() {
        let app = TestAppStateBuilder::new().build();
        let server = TestServer::new(create_app(app.state)).unwrap();

        let response = server.get("/api/healthz").await;

        response.assert_status(StatusCode::OK);
        assert_eq!(
            response.header(http::header::X_CONTENT_TYPE_OPTIONS),
            "nosniff"
        );
        assert_eq!(response.header(http::header::X_FRAME_OPTIONS), "DENY");
    }

    #[tokio::test]
    async fn test_webhook_is_nested_under_polka() {
        let app = TestAppStateBuilder::new().build();
        let server = TestServer::new(create_app(app.state)).unwrap();

        server
            .post("/api/polka/webhooks")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        server
            .get("/healthz")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
