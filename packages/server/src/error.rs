use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::repository::StorageError;
use crate::service::TopError;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `ID_CONFLICT`,
    /// `BAD_REQUEST`, `NOT_FOUND`, `INTERNAL_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "item 5 not provided")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    /// Client-supplied id on create, or body id differing from the path id.
    IdConflict(String),
    /// Request names a resource that does not exist, reported as 400.
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::IdConflict(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "ID_CONFLICT",
                    message: msg,
                },
            ),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "BAD_REQUEST",
                    message: msg,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<TopError> for AppError {
    fn from(err: TopError) -> Self {
        match err {
            TopError::Validation(msg) => AppError::Validation(msg),
            TopError::IdConflict(msg) => AppError::IdConflict(msg.into()),
            TopError::NotFound(_) | TopError::ItemNotFound { .. } => {
                AppError::NotFound(err.to_string())
            }
            TopError::LikesLimit => AppError::BadRequest(err.to_string()),
            TopError::Storage(e) => AppError::from(e),
        }
    }
}

/// Error mapping for the like endpoints, which report a missing Top or item
/// as a bad request rather than 404.
pub fn like_error(err: TopError) -> AppError {
    match err {
        TopError::NotFound(_) | TopError::ItemNotFound { .. } => {
            tracing::warn!("Like target missing: {err}");
            AppError::BadRequest(err.to_string())
        }
        other => other.into(),
    }
}
