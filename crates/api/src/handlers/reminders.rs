//! Handlers for per-user program reminders.
//!
//! Ownership is enforced on every mutation: a reminder belonging to
//! another user is reported as not found, never as forbidden, so the
//! existence of other users' reminders does not leak.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use telegrid_core::error::CoreError;
use telegrid_core::reminders::{self, ReminderStatus};
use telegrid_core::types::DbId;
use telegrid_db::models::reminder::{CreateReminder, NewReminder, Reminder, UpdateReminder};
use telegrid_db::repositories::{ChannelRepo, ProgramRepo, ReminderRepo};
use telegrid_db::{is_unique_violation, UQ_REMINDER_USER_PROGRAM};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query parameters for `GET /programs/reminders/my`.
#[derive(Debug, Deserialize)]
pub struct ReminderListQuery {
    /// Restrict to one lifecycle status.
    pub status: Option<String>,
    /// Keep only reminders firing at or after the request time.
    pub upcoming_only: Option<bool>,
}

/// Fetch a reminder and verify it belongs to `user_id`.
///
/// A reminder owned by someone else surfaces as `NotFound`, same as a
/// missing one.
async fn find_owned(
    state: &AppState,
    user_id: DbId,
    reminder_id: DbId,
) -> AppResult<Reminder> {
    let reminder = ReminderRepo::find_by_id(&state.pool, reminder_id).await?;
    match reminder {
        Some(r) if r.user_id == user_id => Ok(r),
        _ => Err(AppError::Core(CoreError::NotFound {
            entity: "Reminder",
            id: reminder_id,
        })),
    }
}

/// POST /api/v1/programs/{program_id}/reminders
///
/// Create a reminder for a program. Idempotent per (user, program): if a
/// scheduled reminder already exists it is returned unchanged. The
/// program's title, start time, and channel name are snapshotted for
/// display; a dangling channel reference just leaves the name empty.
pub async fn create_reminder(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(program_id): Path<DbId>,
    Json(input): Json<CreateReminder>,
) -> AppResult<Json<Reminder>> {
    let minutes_before = input.minutes_before.unwrap_or(reminders::DEFAULT_MINUTES_BEFORE);
    reminders::validate_minutes_before(minutes_before)?;

    let reminder_type = input
        .reminder_type
        .unwrap_or_else(|| reminders::DEFAULT_REMINDER_TYPE.to_string());
    reminders::validate_reminder_type(&reminder_type)?;

    let program = ProgramRepo::find_by_id(&state.pool, program_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Program",
            id: program_id,
        }))?;

    if let Some(existing) =
        ReminderRepo::find_scheduled(&state.pool, auth.user_id, program_id).await?
    {
        return Ok(Json(existing));
    }

    let channel_name = match program.channel_id {
        Some(channel_id) => ChannelRepo::find_by_id(&state.pool, channel_id)
            .await?
            .map(|c| c.name),
        None => None,
    };

    let new_reminder = NewReminder {
        user_id: auth.user_id,
        program_id,
        minutes_before,
        reminder_type,
        scheduled_for: reminders::scheduled_for(program.start_time, minutes_before),
        program_title: program.title,
        program_start_time: program.start_time,
        channel_name,
    };

    match ReminderRepo::create(&state.pool, &new_reminder).await {
        Ok(reminder) => Ok(Json(reminder)),
        // Lost the check-then-insert race to a concurrent duplicate
        // request; the winner's row is the idempotent result.
        Err(err) if is_unique_violation(&err, UQ_REMINDER_USER_PROGRAM) => {
            let existing = ReminderRepo::find_scheduled(&state.pool, auth.user_id, program_id)
                .await?
                .ok_or_else(|| {
                    AppError::Internal("Scheduled reminder vanished after conflict".into())
                })?;
            Ok(Json(existing))
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /api/v1/programs/reminders/my
///
/// List the authenticated user's reminders, ordered by fire time.
pub async fn my_reminders(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ReminderListQuery>,
) -> AppResult<Json<Vec<Reminder>>> {
    let status = match params.status.as_deref() {
        Some(value) => Some(ReminderStatus::parse(value)?),
        None => None,
    };
    let due_after = params.upcoming_only.unwrap_or(false).then(Utc::now);

    let reminders = ReminderRepo::list_for_user(
        &state.pool,
        auth.user_id,
        status.map(ReminderStatus::as_str),
        due_after,
    )
    .await?;
    Ok(Json(reminders))
}

/// PATCH /api/v1/programs/reminders/{id}
///
/// Partially update an owned reminder. A lead-time change recomputes the
/// fire time from the program's *current* start time (the creation-time
/// snapshot is presentation-only); a status change must follow the state
/// machine.
pub async fn update_reminder(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateReminder>,
) -> AppResult<Json<Reminder>> {
    let existing = find_owned(&state, auth.user_id, id).await?;
    let current_status = ReminderStatus::parse(&existing.status)?;

    if let Some(minutes) = input.minutes_before {
        reminders::validate_minutes_before(minutes)?;
    }
    if let Some(ref reminder_type) = input.reminder_type {
        reminders::validate_reminder_type(reminder_type)?;
    }
    if let Some(ref status) = input.status {
        let target = ReminderStatus::parse(status)?;
        reminders::validate_transition(current_status, target)?;
    }

    // Re-derive the fire time from the catalog, not the snapshot. A
    // reminder whose program has been deleted keeps its stored fire
    // time.
    let scheduled_for = match input.minutes_before {
        Some(minutes) => ProgramRepo::find_by_id(&state.pool, existing.program_id)
            .await?
            .map(|program| reminders::scheduled_for(program.start_time, minutes)),
        None => None,
    };

    let reminder = ReminderRepo::update(&state.pool, id, &input, scheduled_for)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Reminder",
            id,
        }))?;
    Ok(Json(reminder))
}

/// POST /api/v1/programs/reminders/{id}/cancel
///
/// Cancel an owned reminder, preserving it for history. Cancelling an
/// already-cancelled reminder is a no-op success.
pub async fn cancel_reminder(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Reminder>> {
    let existing = find_owned(&state, auth.user_id, id).await?;
    let current_status = ReminderStatus::parse(&existing.status)?;

    if current_status == ReminderStatus::Cancelled {
        return Ok(Json(existing));
    }
    reminders::validate_transition(current_status, ReminderStatus::Cancelled)?;

    let reminder = ReminderRepo::cancel(&state.pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "Reminder is no longer scheduled".into(),
        ))
    })?;
    Ok(Json(reminder))
}

/// DELETE /api/v1/programs/reminders/{id}
///
/// Permanently delete an owned reminder.
pub async fn delete_reminder(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    find_owned(&state, auth.user_id, id).await?;

    let deleted = ReminderRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Reminder",
            id,
        }))
    }
}
