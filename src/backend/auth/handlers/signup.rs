/**
 * Signup Handler
 *
 * This module implements the user registration handler for POST /signup.
 *
 * # Registration Process
 *
 * 1. Validate email format, password length and name length
 * 2. Register through `AuthService` (duplicate check, bcrypt, insert)
 * 3. Return the created user without credentials
 *
 * # Validation
 *
 * - Email must be well-formed
 * - Password must be present and at most 35 characters
 * - Name must be 2-30 characters
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::auth::handlers::types::{SignupRequest, UserResponse};
use crate::backend::error::BackendError;
use crate::identity::AuthService;

/// Sign up handler
///
/// # Errors
///
/// * `400 Bad Request` - If the body is unreadable or a field is malformed
/// * `409 Conflict` - If a user with this email already exists
/// * `500 Internal Server Error` - If hashing or the store fails
///
/// # Example Request
///
/// ```http
/// POST /signup HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "email": "a@x.com",
///   "password": "pw123456",
///   "name": "Ann"
/// }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "id": "123e4567-e89b-12d3-a456-426614174000",
///   "email": "a@x.com",
///   "name": "Ann"
/// }
/// ```
pub async fn signup(
    State(auth): State<AuthService>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), BackendError> {
    let Json(request) = payload.map_err(|e| {
        tracing::warn!("Unreadable signup body: {}", e);
        BackendError::bad_request()
    })?;

    request.validate().map_err(|e| {
        tracing::warn!("Invalid signup request: {}", e);
        e
    })?;

    tracing::info!("Signup request received");

    let user = auth
        .register(&request.email, &request.password, &request.name)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}
