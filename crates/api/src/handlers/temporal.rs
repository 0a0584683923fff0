//! Handlers for the read-side temporal queries: what is on air right
//! now, and what starts soon.
//!
//! The wall clock is read exactly once per request and passed down
//! explicitly, so the repository queries stay deterministic for a given
//! catalog snapshot and instant.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use telegrid_core::temporal;
use telegrid_db::models::program::Program;
use telegrid_db::repositories::ProgramRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// Query parameters for `GET /programs/upcoming/list`.
#[derive(Debug, Deserialize)]
pub struct UpcomingQuery {
    /// Look-ahead in minutes (5–1440, default 60).
    pub minutes_ahead: Option<i64>,
    /// Maximum results (1–50, default 10).
    pub limit: Option<i64>,
}

/// GET /api/v1/programs/live/current
///
/// Programs on air at the time of the request, ordered by start time.
/// Both interval bounds are inclusive: a program starting exactly now is
/// already live.
pub async fn currently_live(State(state): State<AppState>) -> AppResult<Json<Vec<Program>>> {
    let now = Utc::now();
    let programs = ProgramRepo::currently_live(&state.pool, now).await?;
    Ok(Json(programs))
}

/// GET /api/v1/programs/upcoming/list
///
/// Programs starting within the next `minutes_ahead` minutes, capped at
/// `limit`, ordered by start time.
pub async fn upcoming_programs(
    State(state): State<AppState>,
    Query(params): Query<UpcomingQuery>,
) -> AppResult<Json<Vec<Program>>> {
    let minutes_ahead = params.minutes_ahead.unwrap_or(temporal::DEFAULT_MINUTES_AHEAD);
    temporal::validate_minutes_ahead(minutes_ahead)?;

    let limit = params.limit.unwrap_or(temporal::DEFAULT_UPCOMING_LIMIT);
    temporal::validate_upcoming_limit(limit)?;

    let now = Utc::now();
    let (from, to) = temporal::upcoming_window(now, minutes_ahead);

    let programs = ProgramRepo::upcoming(&state.pool, from, to, limit).await?;
    Ok(Json(programs))
}
