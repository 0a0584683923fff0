//! Handlers for the `/channels` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use telegrid_core::error::CoreError;
use telegrid_core::types::DbId;
use telegrid_db::models::channel::{Channel, CreateChannel, UpdateChannel};
use telegrid_db::repositories::ChannelRepo;
use telegrid_db::{clamp_limit, clamp_offset};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Maximum page size for channel listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for channel listing.
const DEFAULT_LIMIT: i64 = 50;

/// Query parameters for `GET /channels`.
#[derive(Debug, Deserialize)]
pub struct ChannelListQuery {
    /// Restrict to active (`true`) or retired (`false`) channels.
    pub is_active: Option<bool>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

/// POST /api/v1/channels
///
/// Create a channel (admin only).
pub async fn create_channel(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateChannel>,
) -> AppResult<(StatusCode, Json<Channel>)> {
    auth.require_admin()?;

    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Channel name must not be empty".into(),
        )));
    }

    let channel = ChannelRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(channel)))
}

/// GET /api/v1/channels
///
/// List channels ordered by display order.
pub async fn list_channels(
    State(state): State<AppState>,
    Query(params): Query<ChannelListQuery>,
) -> AppResult<Json<Vec<Channel>>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.skip);

    let channels = ChannelRepo::list(&state.pool, params.is_active, limit, offset).await?;
    Ok(Json(channels))
}

/// GET /api/v1/channels/{id}
pub async fn get_channel(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Channel>> {
    let channel = ChannelRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Channel",
            id,
        }))?;
    Ok(Json(channel))
}

/// PATCH /api/v1/channels/{id}
///
/// Partially update a channel (admin only).
pub async fn update_channel(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateChannel>,
) -> AppResult<Json<Channel>> {
    auth.require_admin()?;

    if let Some(ref name) = input.name {
        if name.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Channel name must not be empty".into(),
            )));
        }
    }

    let channel = ChannelRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Channel",
            id,
        }))?;
    Ok(Json(channel))
}

/// DELETE /api/v1/channels/{id}
///
/// Hard-delete a channel (admin only). Programs referencing it keep
/// their dangling channel id.
pub async fn delete_channel(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    auth.require_admin()?;

    let deleted = ChannelRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Channel",
            id,
        }))
    }
}
