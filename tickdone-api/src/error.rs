/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers return `Result<T, ApiError>` which converts automatically to
/// the appropriate status code with a `{"error": "..."}` body.
///
/// Internal failures (database, email provider, hashing) are logged with
/// their diagnostic detail and translated to an opaque 500; raw internal
/// error text is never exposed to clients.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tickdone_shared::{auth::password::PasswordError, email::MailerError};

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400) - missing/malformed input, invalid or expired token
    BadRequest(String),

    /// Unauthorized (401) - invalid credentials
    Unauthorized(String),

    /// Not found (404)
    NotFound(String),

    /// Conflict (409) - duplicate account, pending-not-expired, already verified
    Conflict(String),

    /// Internal server error (500)
    InternalError(String),
}

/// Error response format: a single human-readable `error` field
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse { error: message });

        (status, body).into_response()
    }
}

/// Convert sqlx errors to API errors
///
/// Unique-constraint violations surface as conflicts: they are the backstop
/// for the registration race where two concurrent signups for the same
/// identifiers both pass the existence pre-checks.
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                if let Some(constraint) = db_err.constraint() {
                    if constraint.starts_with("pending_users") {
                        return ApiError::Conflict(
                            "Account is already pending verification. Check your email."
                                .to_string(),
                        );
                    }
                    if constraint.starts_with("users") {
                        return ApiError::Conflict(
                            "Email or username already exists. Try logging in.".to_string(),
                        );
                    }
                    return ApiError::Conflict(format!("Constraint violation: {}", constraint));
                }

                ApiError::InternalError(format!("Database error: {}", db_err))
            }
            _ => ApiError::InternalError(format!("Database error: {}", err)),
        }
    }
}

/// Convert password errors to API errors
///
/// Includes the missing-pepper configuration error: surfaced as a 500 rather
/// than proceeding with an insecure default.
impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::InternalError(format!("Password operation failed: {}", err))
    }
}

/// Convert email dispatch errors to API errors
impl From<MailerError> for ApiError {
    fn from(err: MailerError) -> Self {
        ApiError::InternalError(format!("Verification email dispatch failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("Invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: Invalid input");

        let err = ApiError::Conflict("User is already verified.".to_string());
        assert_eq!(err.to_string(), "Conflict: User is already verified.");
    }

    #[tokio::test]
    async fn test_status_code_mapping() {
        let cases = vec![
            (ApiError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (ApiError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (ApiError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ApiError::Conflict("x".into()), StatusCode::CONFLICT),
            (
                ApiError::InternalError("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let response = err.into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[tokio::test]
    async fn test_internal_error_is_opaque() {
        let response =
            ApiError::InternalError("connection refused at 10.0.0.3:5432".into()).into_response();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let parsed: ErrorResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(parsed.error, "An unexpected error occurred");
        assert!(!parsed.error.contains("10.0.0.3"));
    }

    #[tokio::test]
    async fn test_error_body_has_single_error_field() {
        let response = ApiError::BadRequest("Verification token is required.".into()).into_response();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();

        let object = parsed.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object["error"], "Verification token is required.");
    }

    #[test]
    fn test_password_error_maps_to_internal() {
        let err: ApiError = PasswordError::MissingPepper.into();
        assert!(matches!(err, ApiError::InternalError(_)));
    }

    #[test]
    fn test_mailer_error_maps_to_internal() {
        let err: ApiError = MailerError::Delivery("rejected".into()).into();
        assert!(matches!(err, ApiError::InternalError(_)));
    }
}
