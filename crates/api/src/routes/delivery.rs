//! Route definitions for the `/delivery` surface consumed by the external
//! reminder-delivery collaborator.
//!
//! The collaborator polls the due queue on its own cadence and reports
//! the outcome per reminder; this service performs no delivery itself.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::delivery;
use crate::state::AppState;

/// Routes mounted at `/delivery`.
///
/// ```text
/// GET    /reminders/due            -> due_reminders
/// POST   /reminders/{id}/sent      -> mark_sent
/// POST   /reminders/{id}/failed    -> mark_failed
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reminders/due", get(delivery::due_reminders))
        .route("/reminders/{id}/sent", post(delivery::mark_sent))
        .route("/reminders/{id}/failed", post(delivery::mark_failed))
}
