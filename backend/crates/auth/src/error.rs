//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::conversions::sqlx_error_kind;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing, malformed, tampered or expired bearer token, or a token
    /// whose subject has no user record. Deliberately one variant.
    #[error("Could not validate credentials")]
    InvalidToken,

    /// Authenticated caller acting on another identity
    #[error("Email mismatch")]
    EmailMismatch,

    /// Login without an email
    #[error("Email required")]
    EmailRequired,

    /// External identity assertion rejected by the verifier
    #[error("Invalid Google token")]
    InvalidExternalToken,

    /// Field failed value-object validation
    #[error("{0}")]
    Validation(String),

    /// No store behind this process
    #[error("Database not configured")]
    NotConfigured,

    /// Token could not be signed
    #[error("Token signing failed: {0}")]
    TokenSigning(#[from] jsonwebtoken::errors::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidToken => ErrorKind::Unauthorized,
            AuthError::EmailMismatch => ErrorKind::Forbidden,
            AuthError::EmailRequired
            | AuthError::InvalidExternalToken
            | AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::NotConfigured => ErrorKind::ServiceUnavailable,
            AuthError::Database(e) if store_unreachable(e) => ErrorKind::ServiceUnavailable,
            AuthError::TokenSigning(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError. Server-side details stay out of the message.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::InvalidToken => {
                AppError::unauthorized(self.to_string()).with_challenge("Bearer")
            }
            AuthError::Database(e) if store_unreachable(e) => {
                AppError::service_unavailable(AuthError::NotConfigured.to_string())
            }
            AuthError::TokenSigning(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::TokenSigning(e) => {
                tracing::error!(error = %e, "Token signing failed");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::NotConfigured => {
                tracing::warn!("Auth request rejected: database not configured");
            }
            AuthError::EmailMismatch => {
                tracing::warn!("Caller attempted to act on another identity");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

/// Pool timeouts, closed pools and I/O failures mean the store is gone
fn store_unreachable(err: &sqlx::Error) -> bool {
    sqlx_error_kind(err) == ErrorKind::ServiceUnavailable
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

/// Value-object validation failures surface as 400s
impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::Validation(err.message().to_string()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

impl From<platform::bearer::BearerError> for AuthError {
    fn from(err: platform::bearer::BearerError) -> Self {
        tracing::debug!(error = %err, "Bearer credential rejected");
        AuthError::InvalidToken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::InvalidToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::EmailMismatch.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::EmailRequired.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AuthError::InvalidExternalToken.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::NotConfigured.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AuthError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invalid_token_carries_bearer_challenge() {
        let app = AuthError::InvalidToken.to_app_error();
        assert_eq!(app.challenge(), Some("Bearer"));
        assert_eq!(app.message(), "Could not validate credentials");
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let app = AuthError::Internal("pool exploded".into()).to_app_error();
        assert!(!app.message().contains("pool exploded"));
    }

    #[test]
    fn test_unreachable_database_reads_as_not_configured() {
        let err = AuthError::Database(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.to_app_error().message(), "Database not configured");

        let err = AuthError::Database(sqlx::Error::RowNotFound);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_app_error().message(), "Internal server error");
    }

    #[test]
    fn test_validation_from_app_error() {
        let err: AuthError = AppError::bad_request("Invalid email format").into();
        assert!(matches!(err, AuthError::Validation(ref m) if m == "Invalid email format"));
    }
}
