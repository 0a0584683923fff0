//! Repository for the `program_reminders` table.
//!
//! Status strings written here always come from
//! `telegrid_core::reminders::ReminderStatus::as_str`, so the state
//! machine is enforced above this layer; the guarded `WHERE status =
//! 'scheduled'` clauses keep the terminal transitions race-free at the
//! storage level.

use sqlx::PgPool;
use telegrid_core::types::{DbId, Timestamp};

use crate::models::reminder::{NewReminder, Reminder, UpdateReminder};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, program_id, minutes_before, reminder_type, \
    status, scheduled_for, sent_at, program_title, program_start_time, \
    channel_name, created_at, updated_at";

/// Provides CRUD and delivery-queue operations for reminders.
pub struct ReminderRepo;

impl ReminderRepo {
    /// Insert a new scheduled reminder, returning the created row.
    ///
    /// Fails with a unique violation on
    /// `uq_program_reminders_user_program_scheduled` if a scheduled
    /// reminder already exists for the (user, program) pair; callers
    /// fold that race into the idempotent-create path.
    pub async fn create(pool: &PgPool, input: &NewReminder) -> Result<Reminder, sqlx::Error> {
        let query = format!(
            "INSERT INTO program_reminders
                (user_id, program_id, minutes_before, reminder_type, scheduled_for,
                 program_title, program_start_time, channel_name)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reminder>(&query)
            .bind(input.user_id)
            .bind(input.program_id)
            .bind(input.minutes_before)
            .bind(&input.reminder_type)
            .bind(input.scheduled_for)
            .bind(&input.program_title)
            .bind(input.program_start_time)
            .bind(&input.channel_name)
            .fetch_one(pool)
            .await
    }

    /// Find a reminder by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Reminder>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM program_reminders WHERE id = $1");
        sqlx::query_as::<_, Reminder>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the scheduled reminder for a (user, program) pair, if any.
    ///
    /// At most one can exist thanks to the partial unique index.
    pub async fn find_scheduled(
        pool: &PgPool,
        user_id: DbId,
        program_id: DbId,
    ) -> Result<Option<Reminder>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM program_reminders \
             WHERE user_id = $1 AND program_id = $2 AND status = 'scheduled'"
        );
        sqlx::query_as::<_, Reminder>(&query)
            .bind(user_id)
            .bind(program_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's reminders ordered by fire time ascending.
    ///
    /// `status` restricts to one lifecycle state; `due_after` keeps only
    /// reminders firing at or after the given instant (the
    /// "upcoming only" view).
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        status: Option<&str>,
        due_after: Option<Timestamp>,
    ) -> Result<Vec<Reminder>, sqlx::Error> {
        let mut conditions = vec!["user_id = $1".to_string()];
        let mut bind_idx = 2u32;

        if status.is_some() {
            conditions.push(format!("status = ${bind_idx}"));
            bind_idx += 1;
        }
        if due_after.is_some() {
            conditions.push(format!("scheduled_for >= ${bind_idx}"));
        }

        let query = format!(
            "SELECT {COLUMNS} FROM program_reminders \
             WHERE {} \
             ORDER BY scheduled_for ASC, id ASC",
            conditions.join(" AND ")
        );

        let mut q = sqlx::query_as::<_, Reminder>(&query).bind(user_id);
        if let Some(status) = status {
            q = q.bind(status);
        }
        if let Some(due_after) = due_after {
            q = q.bind(due_after);
        }
        q.fetch_all(pool).await
    }

    /// Update a reminder. Only non-`None` fields in `input` are applied.
    ///
    /// `scheduled_for` carries the fire time the caller re-derived from
    /// the program's current start time when `minutes_before` is present
    /// in the update, and `None` otherwise.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateReminder,
        scheduled_for: Option<Timestamp>,
    ) -> Result<Option<Reminder>, sqlx::Error> {
        let query = format!(
            "UPDATE program_reminders SET
                minutes_before = COALESCE($2, minutes_before),
                reminder_type = COALESCE($3, reminder_type),
                status = COALESCE($4, status),
                scheduled_for = COALESCE($5, scheduled_for),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reminder>(&query)
            .bind(id)
            .bind(input.minutes_before)
            .bind(&input.reminder_type)
            .bind(&input.status)
            .bind(scheduled_for)
            .fetch_optional(pool)
            .await
    }

    /// Cancel a scheduled reminder, preserving the row for history.
    ///
    /// Returns `None` if the reminder does not exist or is no longer
    /// `scheduled` (the guard makes concurrent terminal transitions
    /// lose cleanly).
    pub async fn cancel(pool: &PgPool, id: DbId) -> Result<Option<Reminder>, sqlx::Error> {
        let query = format!(
            "UPDATE program_reminders \
             SET status = 'cancelled', updated_at = NOW() \
             WHERE id = $1 AND status = 'scheduled' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reminder>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a reminder by ID. Returns `true` if a row was
    /// removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM program_reminders WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All scheduled reminders whose fire time has been reached,
    /// ordered by fire time ascending. Read-only: the delivery
    /// collaborator polls this and reports back per reminder.
    pub async fn due_for_delivery(
        pool: &PgPool,
        now: Timestamp,
    ) -> Result<Vec<Reminder>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM program_reminders \
             WHERE status = 'scheduled' AND scheduled_for <= $1 \
             ORDER BY scheduled_for ASC, id ASC"
        );
        sqlx::query_as::<_, Reminder>(&query)
            .bind(now)
            .fetch_all(pool)
            .await
    }

    /// Transition a scheduled reminder to `sent`, stamping `sent_at`.
    ///
    /// Returns `None` if the reminder does not exist or is no longer
    /// `scheduled`.
    pub async fn mark_sent(
        pool: &PgPool,
        id: DbId,
        sent_at: Timestamp,
    ) -> Result<Option<Reminder>, sqlx::Error> {
        let query = format!(
            "UPDATE program_reminders \
             SET status = 'sent', sent_at = $2, updated_at = NOW() \
             WHERE id = $1 AND status = 'scheduled' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reminder>(&query)
            .bind(id)
            .bind(sent_at)
            .fetch_optional(pool)
            .await
    }

    /// Transition a scheduled reminder to `failed` after the delivery
    /// collaborator reports a delivery failure.
    ///
    /// Returns `None` if the reminder does not exist or is no longer
    /// `scheduled`.
    pub async fn mark_failed(pool: &PgPool, id: DbId) -> Result<Option<Reminder>, sqlx::Error> {
        let query = format!(
            "UPDATE program_reminders \
             SET status = 'failed', updated_at = NOW() \
             WHERE id = $1 AND status = 'scheduled' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reminder>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
