//! Error type returned by every HTTP handler.
//!
//! Domain failures arrive as [`CoreError`], storage failures as
//! [`sqlx::Error`]. Both serialize to the same `{ "error", "code" }`
//! JSON body, so clients only ever parse one error shape.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use telegrid_core::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Handler return type.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// HTTP status, machine-readable code, and client-safe message.
    ///
    /// Database and internal errors are logged here and collapsed to a
    /// generic message; their details never reach the client.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(CoreError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} with id {id} not found"),
            ),
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Core(CoreError::Conflict(msg)) => {
                (StatusCode::CONFLICT, "CONFLICT", msg.clone())
            }
            AppError::Core(CoreError::Unauthorized(msg)) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
            AppError::Core(CoreError::Forbidden(msg)) => {
                (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone())
            }
            AppError::Core(CoreError::Internal(msg)) => {
                tracing::error!(error = %msg, "internal core error");
                internal_parts()
            }
            AppError::Database(sqlx::Error::RowNotFound) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Resource not found".to_string(),
            ),
            AppError::Database(sqlx::Error::Database(db_err))
                if is_unique_conflict(db_err.as_ref()) =>
            {
                (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!(
                        "Duplicate value violates unique constraint: {}",
                        db_err.constraint().unwrap_or("unknown")
                    ),
                )
            }
            AppError::Database(err) => {
                tracing::error!(error = %err, "database error");
                internal_parts()
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                internal_parts()
            }
        }
    }
}

/// Unique violation (Postgres 23505) on one of our `uq_`-prefixed
/// constraints. Anything else keeps its generic 500 mapping.
fn is_unique_conflict(db_err: &dyn sqlx::error::DatabaseError) -> bool {
    db_err.code().as_deref() == Some("23505")
        && db_err.constraint().is_some_and(|c| c.starts_with("uq_"))
}

fn internal_parts() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, error) = self.parts();
        (status, Json(json!({ "error": error, "code": code }))).into_response()
    }
}
