//! Service health probe.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    status: &'static str,
    version: &'static str,
    db_healthy: bool,
}

/// GET /health
///
/// Reports process liveness and database reachability. Always answers
/// 200; a broken database shows up as `status: "degraded"` with
/// `db_healthy: false`.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    let db_healthy = telegrid_db::health_check(&state.pool).await.is_ok();

    Json(HealthStatus {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}
