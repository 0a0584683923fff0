//! Repository for the `live_channels` table.

use sqlx::PgPool;
use telegrid_core::types::DbId;

use crate::models::channel::{Channel, CreateChannel, UpdateChannel};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, logo_url, display_order, \
    is_active, is_news_channel, created_at, updated_at";

/// Provides CRUD operations for live channels.
pub struct ChannelRepo;

impl ChannelRepo {
    /// Insert a new channel, returning the created row.
    ///
    /// `is_active` defaults to `true` and `is_news_channel` to `false`
    /// when absent.
    pub async fn create(pool: &PgPool, input: &CreateChannel) -> Result<Channel, sqlx::Error> {
        let query = format!(
            "INSERT INTO live_channels
                (name, description, logo_url, display_order, is_active, is_news_channel)
             VALUES ($1, $2, $3, $4, COALESCE($5, TRUE), COALESCE($6, FALSE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Channel>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.logo_url)
            .bind(input.display_order)
            .bind(input.is_active)
            .bind(input.is_news_channel)
            .fetch_one(pool)
            .await
    }

    /// Find a channel by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Channel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM live_channels WHERE id = $1");
        sqlx::query_as::<_, Channel>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List channels ordered by display order.
    ///
    /// The secondary `id` key keeps the ordering stable when several
    /// channels share an order value.
    pub async fn list(
        pool: &PgPool,
        is_active: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Channel>, sqlx::Error> {
        let filter = match is_active {
            Some(true) => "WHERE is_active = TRUE",
            Some(false) => "WHERE is_active = FALSE",
            None => "",
        };
        let query = format!(
            "SELECT {COLUMNS} FROM live_channels {filter} \
             ORDER BY display_order ASC, id ASC \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Channel>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a channel. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateChannel,
    ) -> Result<Option<Channel>, sqlx::Error> {
        let query = format!(
            "UPDATE live_channels SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                logo_url = COALESCE($4, logo_url),
                display_order = COALESCE($5, display_order),
                is_active = COALESCE($6, is_active),
                is_news_channel = COALESCE($7, is_news_channel),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Channel>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.logo_url)
            .bind(input.display_order)
            .bind(input.is_active)
            .bind(input.is_news_channel)
            .fetch_optional(pool)
            .await
    }

    /// Delete a channel by ID. Returns `true` if a row was removed.
    ///
    /// Does not cascade: programs keep their dangling `channel_id` and
    /// consumers treat the missing lookup as "unknown channel".
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM live_channels WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
