//! Feed Error Types
//!
//! Feed-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. Guard failures and user lookups
//! surface as [`AuthError`] and keep their own rendering.

use auth::AuthError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, code, kind::ErrorKind};
use thiserror::Error;

/// Feed-specific result type alias
pub type FeedResult<T> = Result<T, FeedError>;

#[derive(Debug, Error)]
pub enum FeedError {
    /// Malformed or missing input
    #[error("{0}")]
    Validation(String),

    /// Referenced post does not exist
    #[error("Post not found")]
    PostNotFound,

    /// Authentication or user lookup failure
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl FeedError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FeedError::Validation(_) => ErrorKind::BadRequest,
            FeedError::PostNotFound => ErrorKind::NotFound,
            FeedError::Auth(e) => e.kind(),
            FeedError::Database(_) | FeedError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            FeedError::Validation(_) => code::VALIDATION_ERROR,
            FeedError::PostNotFound => code::NOT_FOUND,
            FeedError::Auth(e) => e.code(),
            FeedError::Database(_) | FeedError::Internal(_) => code::INTERNAL,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            FeedError::Auth(e) => e.to_app_error(),
            FeedError::Database(_) | FeedError::Internal(_) => {
                AppError::new(self.kind(), "Internal server error").with_code(self.code())
            }
            other => AppError::new(other.kind(), other.to_string()).with_code(other.code()),
        }
    }

    fn log(&self) {
        match self {
            FeedError::Database(e) => {
                tracing::error!(error = %e, "Feed database error");
            }
            FeedError::Internal(msg) => {
                tracing::error!(message = %msg, "Feed internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Feed error");
            }
        }
    }
}

impl IntoResponse for FeedError {
    fn into_response(self) -> Response {
        match self {
            FeedError::Auth(e) => e.into_response(),
            other => {
                other.log();
                other.to_app_error().into_response()
            }
        }
    }
}

impl From<AppError> for FeedError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => FeedError::Validation(err.message().to_string()),
            ErrorKind::NotFound => FeedError::PostNotFound,
            _ => FeedError::Internal(err.to_string()),
        }
    }
}
