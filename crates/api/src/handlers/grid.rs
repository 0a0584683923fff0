//! Handlers for the day-grouped program grids.
//!
//! Both endpoints fetch a start-time window from the catalog and bucket
//! the results by calendar day in the configured display offset.

use axum::extract::{Query, State};
use axum::Json;
use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use telegrid_core::guide::{self, DayGroup};
use telegrid_core::types::{DbId, Timestamp};
use telegrid_db::models::program::{Program, ProgramFilter};
use telegrid_db::repositories::ProgramRepo;

use crate::error::AppResult;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /programs/grid/weekly`.
#[derive(Debug, Deserialize)]
pub struct WeeklyGridQuery {
    /// Weeks ahead of the current one (0 = this week, max 4).
    pub weeks_ahead: Option<u32>,
    #[serde(rename = "type")]
    pub program_type: Option<String>,
}

/// Query parameters for `GET /programs/grid/daily`.
#[derive(Debug, Deserialize)]
pub struct DailyGridQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub program_type: Option<String>,
    pub channel_id: Option<DbId>,
}

/// Weekly grid: day-grouped programs plus the distinct types observed,
/// for the client's category filter.
#[derive(Debug, Serialize)]
pub struct WeekGrid {
    pub days: Vec<DayGroup<Program>>,
    pub types_available: Vec<String>,
    pub total_count: usize,
}

/// Date-range grid with the resolved window echoed back.
#[derive(Debug, Serialize)]
pub struct DailyGrid {
    pub days: Vec<DayGroup<Program>>,
    pub total_programs: usize,
    pub date_range: DateRange,
}

/// The `[start, end]` window a grid was computed over.
#[derive(Debug, Serialize)]
pub struct DateRange {
    pub start: Timestamp,
    pub end: Timestamp,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/programs/grid/weekly
///
/// Day-grouped programs for one Monday-anchored week. An empty window
/// yields `days: []` and `total_count: 0`, not an error.
pub async fn weekly_grid(
    State(state): State<AppState>,
    Query(params): Query<WeeklyGridQuery>,
) -> AppResult<Json<WeekGrid>> {
    let weeks_ahead = params.weeks_ahead.unwrap_or(0);
    guide::validate_weeks_ahead(weeks_ahead)?;

    let offset = state.config.grid_offset();
    let (start, end) = guide::week_window(Utc::now(), weeks_ahead, offset);

    let filter = ProgramFilter {
        start_from: Some(start),
        start_to: Some(end),
        program_type: params.program_type,
        ..Default::default()
    };
    let programs = ProgramRepo::range(&state.pool, &filter).await?;

    let total_count = programs.len();
    let types_available = guide::types_available(programs.iter().map(|p| p.program_type.as_str()));
    let days = guide::group_by_day(programs, offset, |p| p.start_time);

    Ok(Json(WeekGrid {
        days,
        types_available,
        total_count,
    }))
}

/// GET /api/v1/programs/grid/daily
///
/// Day-grouped programs for an arbitrary date range, defaulting to the
/// current Monday-anchored week when no bounds are supplied.
pub async fn daily_grid(
    State(state): State<AppState>,
    Query(params): Query<DailyGridQuery>,
) -> AppResult<Json<DailyGrid>> {
    let offset = state.config.grid_offset();

    let start = match params.start_date {
        Some(date) => guide::day_start(date, offset),
        None => guide::week_window(Utc::now(), 0, offset).0,
    };
    let end = match params.end_date {
        Some(date) => guide::day_start(date, offset),
        None => start + Duration::days(7),
    };

    let filter = ProgramFilter {
        start_from: Some(start),
        start_to: Some(end),
        program_type: params.program_type,
        channel_id: params.channel_id,
        ..Default::default()
    };
    let programs = ProgramRepo::range(&state.pool, &filter).await?;

    let total_programs = programs.len();
    let days = guide::group_by_day(programs, offset, |p| p.start_time);

    Ok(Json(DailyGrid {
        days,
        total_programs,
        date_range: DateRange { start, end },
    }))
}
