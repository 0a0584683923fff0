//! Handlers for the `/programs` catalog resource.
//!
//! Duration is always derived from the start/end interval here, before
//! any write: creates compute it from the supplied bounds, updates merge
//! the partial bounds with the stored interval first and reject an
//! inverted result without writing anything.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use telegrid_core::error::CoreError;
use telegrid_core::types::DbId;
use telegrid_core::{temporal, timing};
use telegrid_db::models::program::{CreateProgram, Program, ProgramFilter, UpdateProgram};
use telegrid_db::repositories::ProgramRepo;
use telegrid_db::{clamp_limit, clamp_offset};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Maximum page size for program listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for program listing.
const DEFAULT_LIMIT: i64 = 50;

/// Query parameters for `GET /programs`.
///
/// `date` selects a single calendar day (UTC); `start_date`/`end_date`
/// bound the start time range. All other fields are exact-match
/// predicates from the typed catalog filter.
#[derive(Debug, Deserialize)]
pub struct ProgramListQuery {
    pub date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub program_type: Option<String>,
    pub category: Option<String>,
    pub channel_id: Option<DbId>,
    pub is_live: Option<bool>,
    pub has_replay: Option<bool>,
    pub host: Option<String>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

/// Query parameters for `POST /programs/{id}/live`.
#[derive(Debug, Deserialize)]
pub struct MarkLiveQuery {
    /// Defaults to `true`; pass `false` to clear the flag.
    pub is_live: Option<bool>,
}

/// POST /api/v1/programs
///
/// Create a program (admin only). `duration_minutes` is derived from the
/// interval; a caller-supplied value that disagrees is ignored.
pub async fn create_program(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateProgram>,
) -> AppResult<(StatusCode, Json<Program>)> {
    auth.require_admin()?;

    timing::validate_bounds(input.start_time, input.end_time)?;
    let duration = timing::duration_minutes(input.start_time, input.end_time);

    let program = ProgramRepo::create(&state.pool, &input, duration).await?;
    Ok((StatusCode::CREATED, Json(program)))
}

/// GET /api/v1/programs
///
/// List programs matching the typed catalog filter, ordered by start
/// time ascending.
pub async fn list_programs(
    State(state): State<AppState>,
    Query(params): Query<ProgramListQuery>,
) -> AppResult<Json<Vec<Program>>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.skip);

    // A single `date` wins over the open range bounds.
    let (start_from, start_to) = if let Some(date) = params.date {
        let (from, to) = temporal::day_window(date);
        (Some(from), Some(to))
    } else {
        (
            params.start_date.map(|d| temporal::day_window(d).0),
            params.end_date.map(|d| temporal::day_window(d).0),
        )
    };

    let filter = ProgramFilter {
        start_from,
        start_to,
        program_type: params.program_type,
        category: params.category,
        channel_id: params.channel_id,
        is_live: params.is_live,
        has_replay: params.has_replay,
        host: params.host,
    };

    let programs = ProgramRepo::list(&state.pool, &filter, limit, offset).await?;
    Ok(Json(programs))
}

/// GET /api/v1/programs/{id}
pub async fn get_program(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Program>> {
    let program = ProgramRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Program",
            id,
        }))?;
    Ok(Json(program))
}

/// PATCH /api/v1/programs/{id}
///
/// Partially update a program (admin only). When either time bound is
/// present, the duration is recomputed from the merged interval and an
/// inverted result aborts the whole update.
pub async fn update_program(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProgram>,
) -> AppResult<Json<Program>> {
    auth.require_admin()?;

    let existing = ProgramRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Program",
            id,
        }))?;

    let duration = if input.start_time.is_some() || input.end_time.is_some() {
        let (start, end) = timing::merge_bounds(
            existing.start_time,
            existing.end_time,
            input.start_time,
            input.end_time,
        );
        timing::validate_bounds(start, end)?;
        Some(timing::duration_minutes(start, end))
    } else {
        None
    };

    let program = ProgramRepo::update(&state.pool, id, &input, duration)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Program",
            id,
        }))?;
    Ok(Json(program))
}

/// DELETE /api/v1/programs/{id}
///
/// Permanently delete a program (admin only).
pub async fn delete_program(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    auth.require_admin()?;

    let deleted = ProgramRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Program",
            id,
        }))
    }
}

/// POST /api/v1/programs/{id}/live
///
/// Set or clear the live flag without touching timing fields (admin
/// only).
pub async fn mark_live(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<MarkLiveQuery>,
) -> AppResult<Json<Program>> {
    auth.require_admin()?;

    let is_live = params.is_live.unwrap_or(true);
    let program = ProgramRepo::set_live(&state.pool, id, is_live)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Program",
            id,
        }))?;
    Ok(Json(program))
}
