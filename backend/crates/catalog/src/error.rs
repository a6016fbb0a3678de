//! Catalog Error Types
//!
//! Catalog-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.
//!
//! Authorization failures never show up here: the access gate and the
//! handlers turn them into redirects.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use thiserror::Error;

use crate::domain::value_object::user_role::UnknownRole;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Unknown user or wrong password; deliberately one variant
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// A stored row carries a role outside the enum
    #[error("Stored user has an invalid role: {0}")]
    InvalidStoredRole(#[from] UnknownRole),

    /// A stored row fails value-object validation
    #[error("Stored record is invalid: {0}")]
    InvalidStoredRecord(String),

    #[error("Password error: {0}")]
    Password(#[from] PasswordHashError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::InvalidCredentials => ErrorKind::Unauthorized,
            CatalogError::InvalidStoredRole(_)
            | CatalogError::InvalidStoredRecord(_)
            | CatalogError::Password(_)
            | CatalogError::Database(_)
            | CatalogError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError without leaking internals to the client
    pub fn into_app_error(self) -> AppError {
        match self {
            CatalogError::Database(e) => AppError::from(e),
            CatalogError::InvalidCredentials => {
                AppError::new(ErrorKind::Unauthorized, "Invalid credentials")
            }
            other => AppError::new(other.kind(), "Internal error").with_source(other),
        }
    }

    fn log(&self) {
        match self {
            CatalogError::Database(e) => {
                tracing::error!(error = %e, "Catalog database error");
            }
            CatalogError::InvalidStoredRole(e) => {
                tracing::error!(error = %e, "Corrupt user record");
            }
            CatalogError::InvalidStoredRecord(msg) => {
                tracing::error!(message = %msg, "Corrupt stored record");
            }
            CatalogError::Password(e) => {
                tracing::error!(error = %e, "Password verification failed to run");
            }
            CatalogError::Internal(msg) => {
                tracing::error!(message = %msg, "Catalog internal error");
            }
            CatalogError::InvalidCredentials => {
                tracing::debug!("Invalid credentials surfaced as an error response");
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_kinds() {
        assert_eq!(
            CatalogError::InvalidCredentials.kind(),
            ErrorKind::Unauthorized
        );
        assert_eq!(
            CatalogError::Internal("x".into()).kind(),
            ErrorKind::InternalServerError
        );
        assert_eq!(
            CatalogError::from(UnknownRole("ROOT".into())).kind(),
            ErrorKind::InternalServerError
        );
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let app = CatalogError::InvalidStoredRecord("user 7 has an empty name".into())
            .into_app_error();
        assert_eq!(app.message(), "Internal error");
        assert!(std::error::Error::source(&app).is_some());
    }

    #[test]
    fn test_database_error_maps_through_kernel() {
        let app = CatalogError::Database(sqlx::Error::PoolTimedOut).into_app_error();
        assert_eq!(app.kind(), ErrorKind::ServiceUnavailable);
    }

    #[test]
    fn test_into_response_status() {
        let response = CatalogError::Internal("boom".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
