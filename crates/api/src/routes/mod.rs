//! Route definitions.

pub mod channels;
pub mod delivery;
pub mod health;
pub mod programs;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /channels                     channel registry CRUD
/// /programs                     catalog CRUD, grid, temporal, reminders
/// /delivery                     delivery collaborator surface
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/channels", channels::router())
        .nest("/programs", programs::router())
        .nest("/delivery", delivery::router())
}
