//! Learning Error Types
//!
//! This module provides learning-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use auth::AuthError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::conversions::sqlx_error_kind;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Learning-specific result type alias
pub type LearningResult<T> = Result<T, LearningError>;

/// Learning-specific error variants
#[derive(Debug, Error)]
pub enum LearningError {
    /// Authentication or identity failure raised by the auth crate
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Field failed validation
    #[error("{0}")]
    Validation(String),

    /// Unknown certificate id
    #[error("Certificate not found")]
    CertificateNotFound,

    /// No store behind this process
    #[error("Database not configured")]
    NotConfigured,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LearningError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            LearningError::Auth(e) => e.status_code(),
            _ => StatusCode::from_u16(self.kind().status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LearningError::Auth(e) => e.kind(),
            LearningError::Validation(_) => ErrorKind::BadRequest,
            LearningError::CertificateNotFound => ErrorKind::NotFound,
            LearningError::NotConfigured => ErrorKind::ServiceUnavailable,
            LearningError::Database(e) if store_unreachable(e) => ErrorKind::ServiceUnavailable,
            LearningError::Database(_) | LearningError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError. Server-side details stay out of the message.
    pub fn to_app_error(&self) -> AppError {
        match self {
            LearningError::Auth(e) => e.to_app_error(),
            LearningError::Database(e) if store_unreachable(e) => {
                AppError::service_unavailable(LearningError::NotConfigured.to_string())
            }
            LearningError::Database(_) | LearningError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            LearningError::Database(e) => {
                tracing::error!(error = %e, "Learning database error");
            }
            LearningError::Internal(msg) => {
                tracing::error!(message = %msg, "Learning internal error");
            }
            LearningError::NotConfigured => {
                tracing::warn!("Learning request rejected: database not configured");
            }
            _ => {
                tracing::debug!(error = %self, "Learning error");
            }
        }
    }
}

fn store_unreachable(err: &sqlx::Error) -> bool {
    sqlx_error_kind(err) == ErrorKind::ServiceUnavailable
}

impl IntoResponse for LearningError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

/// Value-object validation failures surface as 400s
impl From<AppError> for LearningError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => LearningError::Validation(err.message().to_string()),
            _ => LearningError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            LearningError::NotConfigured.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            LearningError::CertificateNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            LearningError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_auth_errors_keep_their_status() {
        let err: LearningError = AuthError::EmailMismatch.into();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);

        let err: LearningError = AuthError::InvalidToken.into();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_app_error().challenge(), Some("Bearer"));
    }

    #[test]
    fn test_unreachable_database_reads_as_not_configured() {
        for source in [sqlx::Error::PoolTimedOut, sqlx::Error::PoolClosed] {
            let err = LearningError::Database(source);
            assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
            assert_eq!(err.to_app_error().message(), "Database not configured");
        }

        let err: LearningError = AuthError::Database(sqlx::Error::PoolTimedOut).into();
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);

        let err = LearningError::Database(sqlx::Error::RowNotFound);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
