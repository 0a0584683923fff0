//! Program reminder entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use telegrid_core::types::{DbId, Timestamp};

/// A row from the `program_reminders` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Reminder {
    pub id: DbId,
    pub user_id: DbId,
    pub program_id: DbId,
    /// Lead time in minutes (1–1440).
    pub minutes_before: i32,
    /// Delivery-channel hint: `push`, `inapp`, `email`, or `sms`.
    pub reminder_type: String,
    /// `scheduled`, `sent`, `cancelled`, or `failed`.
    pub status: String,
    /// Derived fire time: `program.start_time - minutes_before`, as of
    /// the last recomputation (creation or explicit lead-time update).
    pub scheduled_for: Timestamp,
    pub sent_at: Option<Timestamp>,
    /// Display snapshot taken at creation; not kept in sync with later
    /// program edits.
    pub program_title: Option<String>,
    pub program_start_time: Option<Timestamp>,
    pub channel_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

/// DTO for creating a reminder via `POST /programs/{id}/reminders`.
#[derive(Debug, Deserialize)]
pub struct CreateReminder {
    pub minutes_before: Option<i32>,
    pub reminder_type: Option<String>,
}

/// Fully-resolved insert payload built by the reminder handler after
/// validating the program and computing the fire time.
#[derive(Debug)]
pub struct NewReminder {
    pub user_id: DbId,
    pub program_id: DbId,
    pub minutes_before: i32,
    pub reminder_type: String,
    pub scheduled_for: Timestamp,
    pub program_title: String,
    pub program_start_time: Timestamp,
    pub channel_name: Option<String>,
}

/// DTO for updating a reminder. Only non-`None` fields are applied;
/// `scheduled_for` is recomputed by the handler when `minutes_before`
/// is present.
#[derive(Debug, Deserialize)]
pub struct UpdateReminder {
    pub minutes_before: Option<i32>,
    pub reminder_type: Option<String>,
    pub status: Option<String>,
}
