/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by the
 * authentication and profile handlers, and the shape checks applied to
 * inbound payloads before they reach the identity core.
 */

use serde::{Deserialize, Serialize};

use crate::identity::validation::{validate_email, validate_name, validate_password};
use crate::identity::UserRecord;
use crate::shared::SharedError;

/// Sign up request
#[derive(Deserialize, Serialize, Debug)]
pub struct SignupRequest {
    /// User's email address
    pub email: String,
    /// User's password (will be hashed before storage)
    pub password: String,
    /// Display name (2-30 chars)
    pub name: String,
}

impl SignupRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        validate_email(&self.email)?;
        validate_password(&self.password)?;
        validate_name(&self.name)
    }
}

/// Login request
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    /// User's email address
    pub email: String,
    /// User's password (will be verified against stored hash)
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err(SharedError::validation("password", "Password is required"));
        }
        Ok(())
    }
}

/// Profile update request
#[derive(Deserialize, Serialize, Debug)]
pub struct UpdateProfileRequest {
    pub email: String,
    pub name: String,
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        validate_email(&self.email)?;
        validate_name(&self.name)
    }
}

/// Token response
///
/// Returned by the login handler.
#[derive(Serialize, Deserialize, Debug)]
pub struct TokenResponse {
    /// JWT token for authentication (7-day expiration)
    pub token: String,
}

/// User response (without sensitive data)
///
/// Does not include password hash or other sensitive information.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserResponse {
    /// User's unique ID (UUID)
    pub id: String,
    /// User's email address
    pub email: String,
    /// Display name
    pub name: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
            name: user.name,
        }
    }
}
