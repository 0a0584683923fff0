//! Live channel entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use telegrid_core::types::{DbId, Timestamp};

/// A row from the `live_channels` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Channel {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    /// Position in channel listings. Used for sort stability only, not
    /// uniqueness; two channels may share an order value.
    pub display_order: i32,
    pub is_active: bool,
    /// Continuous-news channels are surfaced separately by some clients.
    pub is_news_channel: bool,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

/// DTO for creating a channel via `POST /channels`.
#[derive(Debug, Deserialize)]
pub struct CreateChannel {
    pub name: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    pub is_active: Option<bool>,
    pub is_news_channel: Option<bool>,
}

/// DTO for updating a channel. Only non-`None` fields are applied.
#[derive(Debug, Deserialize)]
pub struct UpdateChannel {
    pub name: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
    pub is_news_channel: Option<bool>,
}
