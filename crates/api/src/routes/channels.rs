//! Route definitions for the `/channels` resource.
//!
//! Reads are public; mutations require the admin role.

use axum::routing::get;
use axum::Router;

use crate::handlers::channels;
use crate::state::AppState;

/// Routes mounted at `/channels`.
///
/// ```text
/// GET    /          -> list_channels
/// POST   /          -> create_channel (admin)
/// GET    /{id}      -> get_channel
/// PATCH  /{id}      -> update_channel (admin)
/// DELETE /{id}      -> delete_channel (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(channels::list_channels).post(channels::create_channel),
        )
        .route(
            "/{id}",
            get(channels::get_channel)
                .patch(channels::update_channel)
                .delete(channels::delete_channel),
        )
}
