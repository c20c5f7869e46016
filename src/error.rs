//!
//! # Custom Error Handling
//!
//! This module defines `AppError`, the single error type flowing out of the stores,
//! the services and the HTTP handlers. Each variant corresponds to one class of
//! failure the API contract knows about, and `AppError` implements
//! `actix_web::error::ResponseError` so handlers can simply return `Result<_, AppError>`.
//!
//! Internal failures (database, hashing, thread pool) are logged with their detail
//! and rendered to clients as a generic message.

use actix_web::{error::BlockingError, error::ResponseError, http::StatusCode, HttpResponse};
use log::error;
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

/// Message used for every credential failure so callers cannot tell a missing user
/// apart from a wrong password.
pub const BAD_CREDENTIALS: &str = "Please check your login credentials";

/// Represents all possible errors that can occur within the application.
#[derive(Debug, Error)]
pub enum AppError {
    /// Duplicate unique value, e.g. a username that is already taken (HTTP 409).
    #[error("Conflict: {0}")]
    Conflict(String),
    /// Bad credentials or an invalid, expired or orphaned token (HTTP 401).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// Missing resource, or one owned by somebody else (HTTP 404).
    #[error("Not Found: {0}")]
    NotFound(String),
    /// Malformed request (HTTP 400).
    #[error("Bad Request: {0}")]
    BadRequest(String),
    /// Request body deserialized but failed validation rules (HTTP 400).
    #[error("Validation Error: {0}")]
    ValidationError(String),
    /// A dependency such as the database is unreachable (HTTP 503).
    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
    /// Error originating from database operations (HTTP 500).
    #[error("Database Error: {0}")]
    DatabaseError(String),
    /// Any other unexpected server-side failure (HTTP 500).
    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn bad_credentials() -> Self {
        AppError::Unauthorized(BAD_CREDENTIALS.into())
    }

    pub fn task_not_found(id: impl std::fmt::Display) -> Self {
        AppError::NotFound(format!("Task with ID \"{}\" not found", id))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let msg = match self {
            AppError::Conflict(msg)
            | AppError::Unauthorized(msg)
            | AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::ValidationError(msg)
            | AppError::ServiceUnavailable(msg) => msg.as_str(),
            AppError::DatabaseError(detail) | AppError::InternalServerError(detail) => {
                error!("{}", detail);
                "Internal server error"
            }
        };
        HttpResponse::build(self.status_code()).json(json!({ "error": msg }))
    }
}

/// Unique-constraint violations become `Conflict`, a missing row becomes `NotFound`,
/// everything else is a `DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match &error {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict("Record already exists".into())
            }
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Token failures never say why the token was rejected.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(_: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized("Unauthorized".into())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(format!("Password hashing failed: {}", error))
    }
}

impl From<BlockingError> for AppError {
    fn from(error: BlockingError) -> AppError {
        AppError::InternalServerError(format!("Blocking task failed: {}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_error_statuses() {
        assert_eq!(AppError::Conflict("taken".into()).error_response().status(), 409);
        assert_eq!(AppError::bad_credentials().error_response().status(), 401);
        assert_eq!(AppError::task_not_found("x").error_response().status(), 404);
        assert_eq!(AppError::BadRequest("bad".into()).error_response().status(), 400);
        assert_eq!(AppError::ValidationError("short".into()).error_response().status(), 400);
        assert_eq!(AppError::ServiceUnavailable("db".into()).error_response().status(), 503);
        assert_eq!(AppError::DatabaseError("boom".into()).error_response().status(), 500);
        assert_eq!(
            AppError::InternalServerError("boom".into()).error_response().status(),
            500
        );
    }

    #[actix_rt::test]
    async fn test_internal_detail_is_not_leaked() {
        let response = AppError::DatabaseError("relation \"users\" does not exist".into())
            .error_response();
        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Internal server error");
    }

    #[test]
    fn test_pool_timeout_is_internal() {
        let err = AppError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, AppError::DatabaseError(_)));
        assert_eq!(err.error_response().status(), 500);
    }

    #[test]
    fn test_task_not_found_message() {
        match AppError::task_not_found("abc") {
            AppError::NotFound(msg) => assert_eq!(msg, "Task with ID \"abc\" not found"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_jwt_error_is_generic_unauthorized() {
        let jwt_err: jsonwebtoken::errors::Error =
            jsonwebtoken::errors::ErrorKind::ExpiredSignature.into();
        match AppError::from(jwt_err) {
            AppError::Unauthorized(msg) => assert_eq!(msg, "Unauthorized"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
