//! Route definitions for the `/programs` resource: catalog CRUD, the
//! day-grouped grids, temporal queries, and per-user reminders.
//!
//! Catalog reads, grids, and temporal queries are public; catalog
//! mutations require the admin role; reminder routes require an
//! authenticated user.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{grid, programs, reminders, temporal};
use crate::state::AppState;

/// Routes mounted at `/programs`.
///
/// ```text
/// GET    /                        -> list_programs
/// POST   /                        -> create_program (admin)
/// GET    /grid/weekly             -> weekly_grid
/// GET    /grid/daily              -> daily_grid
/// GET    /live/current            -> currently_live
/// GET    /upcoming/list           -> upcoming_programs
///
/// GET    /reminders/my            -> my_reminders
/// PATCH  /reminders/{id}          -> update_reminder
/// DELETE /reminders/{id}          -> delete_reminder
/// POST   /reminders/{id}/cancel   -> cancel_reminder
///
/// GET    /{id}                    -> get_program
/// PATCH  /{id}                    -> update_program (admin)
/// DELETE /{id}                    -> delete_program (admin)
/// POST   /{id}/live               -> mark_live (admin)
/// POST   /{id}/reminders          -> create_reminder
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        // Catalog
        .route(
            "/",
            get(programs::list_programs).post(programs::create_program),
        )
        // Grid
        .route("/grid/weekly", get(grid::weekly_grid))
        .route("/grid/daily", get(grid::daily_grid))
        // Temporal queries
        .route("/live/current", get(temporal::currently_live))
        .route("/upcoming/list", get(temporal::upcoming_programs))
        // Reminders
        .route("/reminders/my", get(reminders::my_reminders))
        .route(
            "/reminders/{id}",
            patch(reminders::update_reminder).delete(reminders::delete_reminder),
        )
        .route("/reminders/{id}/cancel", post(reminders::cancel_reminder))
        // Catalog by id (static segments above win over `{id}`)
        .route(
            "/{id}",
            get(programs::get_program)
                .patch(programs::update_program)
                .delete(programs::delete_program),
        )
        .route("/{id}/live", post(programs::mark_live))
        .route("/{id}/reminders", post(reminders::create_reminder))
}
