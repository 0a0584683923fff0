//! Repository for the `programs` table: catalog CRUD plus the read-side
//! temporal queries (currently-live, upcoming, range).

use sqlx::PgPool;
use telegrid_core::types::{DbId, Timestamp};

use crate::models::program::{CreateProgram, Program, ProgramFilter, UpdateProgram};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, program_type, category, \
    start_time, end_time, image_url, thumbnail_url, host, guests, \
    is_live, has_replay, replay_url, channel_id, show_id, \
    duration_minutes, rating, created_at, updated_at";

/// Provides CRUD and temporal query operations for programs.
pub struct ProgramRepo;

impl ProgramRepo {
    /// Insert a new program, returning the created row.
    ///
    /// `duration_minutes` is the value derived from the interval by the
    /// caller; the DTO's own duration field is never trusted.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProgram,
        duration_minutes: i32,
    ) -> Result<Program, sqlx::Error> {
        let query = format!(
            "INSERT INTO programs
                (title, description, program_type, category, start_time, end_time,
                 image_url, thumbnail_url, host, guests, has_replay, replay_url,
                 channel_id, show_id, rating, duration_minutes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                     COALESCE($11, FALSE), $12, $13, $14, $15, $16)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Program>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.program_type)
            .bind(&input.category)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(&input.image_url)
            .bind(&input.thumbnail_url)
            .bind(&input.host)
            .bind(&input.guests)
            .bind(input.has_replay)
            .bind(&input.replay_url)
            .bind(input.channel_id)
            .bind(input.show_id)
            .bind(&input.rating)
            .bind(duration_minutes)
            .fetch_one(pool)
            .await
    }

    /// Find a program by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Program>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM programs WHERE id = $1");
        sqlx::query_as::<_, Program>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List programs matching `filter`, ordered by start time ascending,
    /// with pagination.
    pub async fn list(
        pool: &PgPool,
        filter: &ProgramFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Program>, sqlx::Error> {
        let (where_clause, bind_values, bind_idx) = build_program_filter(filter);
        let query = format!(
            "SELECT {COLUMNS} FROM programs {where_clause} \
             ORDER BY start_time ASC, id ASC \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );

        let q = bind_program_values(sqlx::query_as::<_, Program>(&query), &bind_values);
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// All programs matching `filter` with no pagination, ordered by
    /// start time ascending. Feeds the grid aggregator, which needs the
    /// whole window at once.
    pub async fn range(pool: &PgPool, filter: &ProgramFilter) -> Result<Vec<Program>, sqlx::Error> {
        let (where_clause, bind_values, _) = build_program_filter(filter);
        let query = format!(
            "SELECT {COLUMNS} FROM programs {where_clause} ORDER BY start_time ASC, id ASC"
        );

        let q = bind_program_values(sqlx::query_as::<_, Program>(&query), &bind_values);
        q.fetch_all(pool).await
    }

    /// Programs on air at `now`: `start_time <= now <= end_time`, both
    /// bounds inclusive, ordered by start time ascending.
    pub async fn currently_live(pool: &PgPool, now: Timestamp) -> Result<Vec<Program>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM programs \
             WHERE start_time <= $1 AND end_time >= $1 \
             ORDER BY start_time ASC, id ASC"
        );
        sqlx::query_as::<_, Program>(&query)
            .bind(now)
            .fetch_all(pool)
            .await
    }

    /// Programs starting within `[from, to]`, capped at `limit`, ordered
    /// by start time ascending.
    pub async fn upcoming(
        pool: &PgPool,
        from: Timestamp,
        to: Timestamp,
        limit: i64,
    ) -> Result<Vec<Program>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM programs \
             WHERE start_time >= $1 AND start_time <= $2 \
             ORDER BY start_time ASC, id ASC \
             LIMIT $3"
        );
        sqlx::query_as::<_, Program>(&query)
            .bind(from)
            .bind(to)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Update a program. Only non-`None` fields in `input` are applied.
    ///
    /// `duration_minutes` carries the value the caller re-derived from
    /// the merged interval when either time bound is present in the
    /// update, and `None` when timing is untouched.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProgram,
        duration_minutes: Option<i32>,
    ) -> Result<Option<Program>, sqlx::Error> {
        let query = format!(
            "UPDATE programs SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                program_type = COALESCE($4, program_type),
                category = COALESCE($5, category),
                start_time = COALESCE($6, start_time),
                end_time = COALESCE($7, end_time),
                image_url = COALESCE($8, image_url),
                thumbnail_url = COALESCE($9, thumbnail_url),
                host = COALESCE($10, host),
                guests = COALESCE($11, guests),
                is_live = COALESCE($12, is_live),
                has_replay = COALESCE($13, has_replay),
                replay_url = COALESCE($14, replay_url),
                channel_id = COALESCE($15, channel_id),
                show_id = COALESCE($16, show_id),
                rating = COALESCE($17, rating),
                duration_minutes = COALESCE($18, duration_minutes),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Program>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.program_type)
            .bind(&input.category)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(&input.image_url)
            .bind(&input.thumbnail_url)
            .bind(&input.host)
            .bind(&input.guests)
            .bind(input.is_live)
            .bind(input.has_replay)
            .bind(&input.replay_url)
            .bind(input.channel_id)
            .bind(input.show_id)
            .bind(&input.rating)
            .bind(duration_minutes)
            .fetch_optional(pool)
            .await
    }

    /// Set the live flag without touching any timing field.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_live(
        pool: &PgPool,
        id: DbId,
        is_live: bool,
    ) -> Result<Option<Program>, sqlx::Error> {
        let query = format!(
            "UPDATE programs SET is_live = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Program>(&query)
            .bind(id)
            .bind(is_live)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a program by ID. Returns `true` if a row was
    /// removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM programs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// Internal helpers for dynamic query building
// ---------------------------------------------------------------------------

/// Typed bind value for dynamically-built program queries.
enum BindValue {
    BigInt(i64),
    Text(String),
    Bool(bool),
    Timestamp(Timestamp),
}

/// Build a WHERE clause and bind values from the typed catalog filter.
///
/// Returns `(where_clause, bind_values, next_bind_index)`. The
/// `where_clause` is empty if no predicates are active, or starts with
/// `WHERE `.
fn build_program_filter(filter: &ProgramFilter) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    if let Some(from) = filter.start_from {
        conditions.push(format!("start_time >= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Timestamp(from));
    }

    if let Some(to) = filter.start_to {
        conditions.push(format!("start_time <= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Timestamp(to));
    }

    if let Some(ref program_type) = filter.program_type {
        conditions.push(format!("program_type = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(program_type.clone()));
    }

    if let Some(ref category) = filter.category {
        conditions.push(format!("category = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(category.clone()));
    }

    if let Some(channel_id) = filter.channel_id {
        conditions.push(format!("channel_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(channel_id));
    }

    if let Some(is_live) = filter.is_live {
        conditions.push(format!("is_live = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Bool(is_live));
    }

    if let Some(has_replay) = filter.has_replay {
        conditions.push(format!("has_replay = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Bool(has_replay));
    }

    if let Some(ref host) = filter.host {
        conditions.push(format!("host = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(host.clone()));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values, bind_idx)
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_program_values<'q>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, Program, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, Program, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Bool(v) => q = q.bind(*v),
            BindValue::Timestamp(v) => q = q.bind(*v),
        }
    }
    q
}
