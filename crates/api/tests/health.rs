//! Integration tests for the root-level health probe and general HTTP
//! behaviour of the router.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_reports_ok_when_database_is_reachable(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db_healthy"], true);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn every_response_carries_a_request_id(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(&app, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("x-request-id header missing")
        .to_str()
        .unwrap();
    // UUIDs serialize to 36 characters.
    assert_eq!(request_id.len(), 36);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_paths_fall_through_to_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    assert_eq!(get(&app, "/nope").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        get(&app, "/api/v1/nope").await.status(),
        StatusCode::NOT_FOUND
    );
}
