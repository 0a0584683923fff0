//! Trusted-gateway identity extractor for Axum handlers.
//!
//! Authentication happens upstream; the gateway strips any client-sent
//! identity headers and injects `x-user-id` / `x-user-role` for requests
//! it has authenticated. This service trusts those headers as-is and only
//! performs per-resource ownership checks on top.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use telegrid_core::error::CoreError;
use telegrid_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// Role granted when the gateway supplies no `x-user-role` header.
const DEFAULT_ROLE: &str = "viewer";

/// Role required for catalog and delivery mutations.
const ADMIN_ROLE: &str = "admin";

/// Authenticated user extracted from gateway-injected identity headers.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `x-user-id`).
    pub user_id: DbId,
    /// The user's role name (from `x-user-role`, default `"viewer"`).
    pub role: String,
}

impl AuthUser {
    /// Require the admin role, used by catalog and delivery mutations.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.role == ADMIN_ROLE {
            Ok(())
        } else {
            Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )))
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Missing x-user-id header".into()))
            })?
            .parse::<DbId>()
            .map_err(|_| {
                AppError::Core(CoreError::Unauthorized("Invalid x-user-id header".into()))
            })?;

        let role = parts
            .headers
            .get("x-user-role")
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_ROLE)
            .to_string();

        Ok(AuthUser { user_id, role })
    }
}
