//! Handlers for the delivery collaborator surface.
//!
//! The external notifier polls `GET /delivery/reminders/due` on its own
//! cadence, attempts delivery, and reports the outcome per reminder via
//! the sent/failed transitions. Reading the due queue never mutates
//! state; delivery failures are only ever recorded through the explicit
//! `failed` transition, never inferred here.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use telegrid_core::error::CoreError;
use telegrid_core::reminders::{self, ReminderStatus};
use telegrid_core::types::DbId;
use telegrid_db::models::reminder::Reminder;
use telegrid_db::repositories::ReminderRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/delivery/reminders/due
///
/// All scheduled reminders whose fire time has been reached, ordered by
/// fire time ascending (admin only).
pub async fn due_reminders(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Reminder>>>> {
    auth.require_admin()?;

    let now = Utc::now();
    let due = ReminderRepo::due_for_delivery(&state.pool, now).await?;
    Ok(Json(DataResponse { data: due }))
}

/// POST /api/v1/delivery/reminders/{id}/sent
///
/// Record a successful delivery: `scheduled -> sent`, stamping `sent_at`
/// (admin only).
pub async fn mark_sent(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Reminder>> {
    auth.require_admin()?;

    let existing = ReminderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Reminder",
            id,
        }))?;
    let current = ReminderStatus::parse(&existing.status)?;
    reminders::validate_transition(current, ReminderStatus::Sent)?;

    let reminder = ReminderRepo::mark_sent(&state.pool, id, Utc::now())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Reminder is no longer scheduled".into(),
            ))
        })?;
    Ok(Json(reminder))
}

/// POST /api/v1/delivery/reminders/{id}/failed
///
/// Record a failed delivery attempt: `scheduled -> failed` (admin only).
pub async fn mark_failed(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Reminder>> {
    auth.require_admin()?;

    let existing = ReminderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Reminder",
            id,
        }))?;
    let current = ReminderStatus::parse(&existing.status)?;
    reminders::validate_transition(current, ReminderStatus::Failed)?;

    let reminder = ReminderRepo::mark_failed(&state.pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "Reminder is no longer scheduled".into(),
        ))
    })?;
    Ok(Json(reminder))
}
