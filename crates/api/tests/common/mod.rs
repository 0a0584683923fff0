//! Shared helpers for API integration tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use telegrid_api::config::ServerConfig;
use telegrid_api::router::build_app_router;
use telegrid_api::state::AppState;

/// Identity headers for a regular authenticated user.
pub const USER: (i64, &str) = (7, "viewer");

/// Identity headers for an administrator.
pub const ADMIN: (i64, &str) = (1, "admin");

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev
/// default), a 30-second request timeout, and a UTC grid display offset.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        grid_utc_offset_minutes: 0,
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool. Integration tests exercise the same stack
/// that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Send a request through the router, optionally with identity headers
/// and a JSON body.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    user: Option<(i64, &str)>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some((user_id, role)) = user {
        builder = builder
            .header("x-user-id", user_id.to_string())
            .header("x-user-role", role);
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

/// GET without identity headers.
pub async fn get(app: &Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

/// GET with identity headers.
pub async fn get_as(app: &Router, uri: &str, user: (i64, &str)) -> Response {
    send(app, Method::GET, uri, Some(user), None).await
}

/// POST a JSON body with identity headers.
pub async fn post_json_as(
    app: &Router,
    uri: &str,
    user: (i64, &str),
    body: serde_json::Value,
) -> Response {
    send(app, Method::POST, uri, Some(user), Some(body)).await
}

/// PATCH a JSON body with identity headers.
pub async fn patch_json_as(
    app: &Router,
    uri: &str,
    user: (i64, &str),
    body: serde_json::Value,
) -> Response {
    send(app, Method::PATCH, uri, Some(user), Some(body)).await
}

/// Consume a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Consume a response, asserting its status first.
pub async fn expect_json(response: Response, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}
