//! HTTP error mapping.
//!
//! Every failure leaves the API as `{"error": <message>, "code": <CODE>}`.
//! Database and internal failures are logged in full and answered with a
//! generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use festival_core::error::CoreError;
use festival_db::ordering::ReorderError;
use serde::Serialize;

const GENERIC_INTERNAL: &str = "An internal error occurred";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Request body broke one of its `validator` rules.
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<ReorderError> for AppError {
    fn from(err: ReorderError) -> Self {
        match err {
            ReorderError::Rejected(core) => Self::Core(core),
            ReorderError::Database(db) => Self::Database(db),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Core(core) => match core {
                CoreError::NotFound { .. } | CoreError::NotFoundByKey { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND")
                }
                CoreError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                CoreError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
                CoreError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
                CoreError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
                CoreError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            },
            Self::Database(sqlx::Error::RowNotFound) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Database(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                (StatusCode::CONFLICT, "CONFLICT")
            }
            Self::Database(_) | Self::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
        }
    }

    /// Message shown to the client.
    fn public_message(&self, status: StatusCode) -> String {
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            return GENERIC_INTERNAL.to_string();
        }
        match self {
            Self::Core(CoreError::Validation(msg))
            | Self::Core(CoreError::Conflict(msg))
            | Self::Core(CoreError::Unauthorized(msg))
            | Self::Core(CoreError::Forbidden(msg))
            | Self::BadRequest(msg) => msg.clone(),
            Self::Database(sqlx::Error::RowNotFound) => "Resource not found".to_string(),
            Self::Database(_) => "An entry with the same unique value already exists".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorBody {
            error: self.public_message(status),
            code,
        };
        (status, Json(body)).into_response()
    }
}
