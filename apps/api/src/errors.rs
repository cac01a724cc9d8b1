use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resume document could not be fetched or decoded. Propagated as-is;
    /// the interpreter never returns a partial record.
    #[error("Document unavailable: {0}")]
    DocumentUnavailable(String),

    /// Job catalog read failed. Fatal for matching; the recommender
    /// tolerates it by treating the catalog as empty instead.
    #[error("Job catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// No profile row exists for the given user.
    #[error("Profile missing for user {0}")]
    ProfileMissing(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::DocumentUnavailable(msg) => {
                tracing::warn!("Document unavailable: {msg}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "DOCUMENT_UNAVAILABLE",
                    format!("Resume document could not be fetched or decoded: {msg}"),
                )
            }
            AppError::CatalogUnavailable(msg) => {
                tracing::error!("Job catalog unavailable: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "CATALOG_UNAVAILABLE",
                    "The job catalog could not be read".to_string(),
                )
            }
            AppError::ProfileMissing(user_id) => (
                StatusCode::NOT_FOUND,
                "PROFILE_MISSING",
                format!("No profile exists for user {user_id}"),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
