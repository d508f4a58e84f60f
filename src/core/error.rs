use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Covers both "does not exist" and "exists but not authorized".
    /// Merged on purpose so callers cannot enumerate other customers' media.
    #[error("Resource not found")]
    NotFound,

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Invalid filename")]
    InvalidFilename,

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// A resolved file path escaped its allow-listed base directory.
    /// Full detail is logged where the escape is detected; the client only
    /// ever sees a generic message.
    #[error("Path traversal attempt")]
    PathTraversal,

    /// Database row exists but the backing file is missing from disk.
    #[error("Resource missing from storage")]
    NotFoundOnDisk,

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::NotFound | AppError::NotFoundOnDisk => {
                (StatusCode::NOT_FOUND, "Resource not found".to_string())
            }
            AppError::InvalidIdentifier(ref msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InvalidFilename => (StatusCode::BAD_REQUEST, "Invalid filename".to_string()),
            AppError::InvalidEmail(ref msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::PathTraversal => (StatusCode::FORBIDDEN, "Access denied".to_string()),
            AppError::Auth(ref msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ApiResponse::<()>::error(Some(message), None));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_variants_share_a_status() {
        let a = AppError::NotFound.into_response();
        let b = AppError::NotFoundOnDisk.into_response();
        assert_eq!(a.status(), StatusCode::NOT_FOUND);
        assert_eq!(b.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn path_traversal_maps_to_forbidden() {
        let resp = AppError::PathTraversal.into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
