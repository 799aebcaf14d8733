/**
 * Auth Error Types
 *
 * `AuthError` is the closed set of outcomes `AuthService` reports. The four
 * user-facing kinds are decided once, at the call site that observed the
 * underlying failure. Failures the service has no mapping for pass through
 * unchanged in the transparent variants.
 */

use thiserror::Error;

use crate::identity::password::PasswordError;
use crate::identity::sessions::TokenError;
use crate::identity::store::StoreError;

pub const BAD_REQUEST_MSG: &str = "Incorrect data";
pub const WRONG_CREDENTIALS_MSG: &str = "Wrong email or password";
pub const AUTHORIZATION_REQUIRED_MSG: &str = "Authorization required";
pub const USER_NOT_FOUND_MSG: &str = "User not found";
pub const USER_CONFLICT_MSG: &str = "User with this email already exists";

/// Outcome of a failed `AuthService` operation
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed input or id
    #[error("{0}")]
    BadRequest(String),

    /// Missing, invalid or expired token, or failed login
    #[error("{0}")]
    Unauthorized(String),

    /// The operation's target does not exist
    #[error("{0}")]
    NotFound(String),

    /// Uniqueness violation
    #[error("{0}")]
    Conflict(String),

    /// Store failure with no user-facing mapping
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Hashing failure
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Token signing failure
    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Coarse error kinds, for callers that only need to branch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    BadRequest,
    Unauthorized,
    NotFound,
    Conflict,
    Internal,
}

impl AuthError {
    pub fn bad_request() -> Self {
        Self::BadRequest(BAD_REQUEST_MSG.to_string())
    }

    pub fn wrong_credentials() -> Self {
        Self::Unauthorized(WRONG_CREDENTIALS_MSG.to_string())
    }

    pub fn authorization_required() -> Self {
        Self::Unauthorized(AUTHORIZATION_REQUIRED_MSG.to_string())
    }

    pub fn user_not_found() -> Self {
        Self::NotFound(USER_NOT_FOUND_MSG.to_string())
    }

    pub fn user_conflict() -> Self {
        Self::Conflict(USER_CONFLICT_MSG.to_string())
    }

    pub fn kind(&self) -> AuthErrorKind {
        match self {
            Self::BadRequest(_) => AuthErrorKind::BadRequest,
            Self::Unauthorized(_) => AuthErrorKind::Unauthorized,
            Self::NotFound(_) => AuthErrorKind::NotFound,
            Self::Conflict(_) => AuthErrorKind::Conflict,
            Self::Store(_) | Self::Password(_) | Self::Token(_) => AuthErrorKind::Internal,
        }
    }
}
