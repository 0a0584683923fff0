//! Program (EPG entry) entity models, DTOs, and the typed catalog filter.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use telegrid_core::types::{DbId, Timestamp};

/// A row from the `programs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Program {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    /// Free-text primary category, e.g. `News`, `Sport`, `Culture`.
    #[serde(rename = "type")]
    pub program_type: String,
    /// Optional secondary category.
    pub category: Option<String>,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub host: Option<String>,
    pub guests: Vec<String>,
    pub is_live: bool,
    pub has_replay: bool,
    pub replay_url: Option<String>,
    /// Weak reference; the channel may no longer exist.
    pub channel_id: Option<DbId>,
    /// Weak reference to the show catalog.
    pub show_id: Option<DbId>,
    /// Derived from the interval; recomputed whenever either bound changes.
    pub duration_minutes: i32,
    pub rating: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

/// DTO for creating a program via `POST /programs`.
///
/// `duration_minutes` is accepted for wire compatibility but the stored
/// value is always derived from the start/end interval.
#[derive(Debug, Deserialize)]
pub struct CreateProgram {
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub program_type: String,
    pub category: Option<String>,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub host: Option<String>,
    #[serde(default)]
    pub guests: Vec<String>,
    pub has_replay: Option<bool>,
    pub replay_url: Option<String>,
    pub channel_id: Option<DbId>,
    pub show_id: Option<DbId>,
    pub rating: Option<String>,
    pub duration_minutes: Option<i32>,
}

/// DTO for updating a program. Only non-`None` fields are applied; the
/// duration is recomputed by the handler when either time bound is
/// present.
#[derive(Debug, Deserialize)]
pub struct UpdateProgram {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub program_type: Option<String>,
    pub category: Option<String>,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub host: Option<String>,
    pub guests: Option<Vec<String>>,
    pub is_live: Option<bool>,
    pub has_replay: Option<bool>,
    pub replay_url: Option<String>,
    pub channel_id: Option<DbId>,
    pub show_id: Option<DbId>,
    pub rating: Option<String>,
}

/// Typed filter for catalog list/range queries.
///
/// Every supported predicate is an explicit field; there is no
/// open-ended key-value filtering, so consumers and tests enumerate
/// exactly what the catalog can answer.
#[derive(Debug, Default)]
pub struct ProgramFilter {
    /// Inclusive lower bound on `start_time`.
    pub start_from: Option<Timestamp>,
    /// Inclusive upper bound on `start_time`.
    pub start_to: Option<Timestamp>,
    pub program_type: Option<String>,
    pub category: Option<String>,
    pub channel_id: Option<DbId>,
    pub is_live: Option<bool>,
    pub has_replay: Option<bool>,
    pub host: Option<String>,
}
