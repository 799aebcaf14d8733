/**
 * Backend Error Types
 *
 * This module defines the error type returned by HTTP handlers and
 * middleware. It wraps `AuthError` from the identity core and maps each kind
 * onto an HTTP status.
 *
 * # Status Mapping
 *
 * - `BadRequest` / validation failures - 400
 * - `Unauthorized` - 401
 * - `NotFound` - 404
 * - `Conflict` - 409
 * - Anything the core passed through unmapped - 500 with a generic message
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::identity::error::BAD_REQUEST_MSG;
use crate::identity::{AuthError, AuthErrorKind};
use crate::shared::SharedError;

/// Message for every 500 response
pub const SERVER_ERROR_MSG: &str = "An error occurred on the server";

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use idgate::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::NOT_FOUND, "Resource not found");
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error with an explicit status (e.g. unknown route, unreadable body)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Outcome of an identity operation
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Request payload failed validation
    #[error(transparent)]
    SharedError(#[from] SharedError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Shorthand for a 400 with the generic bad-request message
    pub fn bad_request() -> Self {
        Self::handler(StatusCode::BAD_REQUEST, BAD_REQUEST_MSG)
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::Auth(err) => match err.kind() {
                AuthErrorKind::BadRequest => StatusCode::BAD_REQUEST,
                AuthErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
                AuthErrorKind::NotFound => StatusCode::NOT_FOUND,
                AuthErrorKind::Conflict => StatusCode::CONFLICT,
                AuthErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the message sent to the client
    ///
    /// Internal failures are never described to the client.
    pub fn message(&self) -> String {
        if self.status_code().is_server_error() {
            return SERVER_ERROR_MSG.to_string();
        }

        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::Auth(err) => err.to_string(),
            Self::SharedError(_) => BAD_REQUEST_MSG.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::error::{AUTHORIZATION_REQUIRED_MSG, USER_CONFLICT_MSG};
    use crate::identity::StoreError;

    #[test]
    fn test_handler_error() {
        let error = BackendError::handler(StatusCode::NOT_FOUND, "Resource not found");
        match error {
            BackendError::HandlerError { status, message } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(message, "Resource not found");
            }
            _ => panic!("Expected HandlerError"),
        }
    }

    #[test]
    fn test_auth_status_code_mapping() {
        let cases = [
            (AuthError::bad_request(), StatusCode::BAD_REQUEST),
            (AuthError::authorization_required(), StatusCode::UNAUTHORIZED),
            (AuthError::user_not_found(), StatusCode::NOT_FOUND),
            (AuthError::user_conflict(), StatusCode::CONFLICT),
            (AuthError::from(StoreError::NotFound), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (auth_error, status) in cases {
            assert_eq!(BackendError::from(auth_error).status_code(), status);
        }
    }

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(
            BackendError::from(AuthError::authorization_required()).message(),
            AUTHORIZATION_REQUIRED_MSG
        );
        assert_eq!(BackendError::from(AuthError::user_conflict()).message(), USER_CONFLICT_MSG);
    }

    #[test]
    fn test_internal_errors_are_generic() {
        let error = BackendError::from(AuthError::from(StoreError::backend(std::io::Error::other(
            "connection reset by 10.0.0.7",
        ))));
        assert_eq!(error.message(), SERVER_ERROR_MSG);
    }

    #[test]
    fn test_from_shared_error() {
        let backend_error: BackendError = SharedError::validation("name", "too short").into();
        assert_eq!(backend_error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(backend_error.message(), BAD_REQUEST_MSG);
    }
}
