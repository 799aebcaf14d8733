/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /signin.
 *
 * # Authentication Process
 *
 * 1. Look up user by email
 * 2. Verify password using bcrypt
 * 3. Generate JWT token
 *
 * # Security
 *
 * - Unknown email and wrong password return the same 401 body
 * - Passwords are never logged or returned in responses
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::auth::handlers::types::{LoginRequest, TokenResponse};
use crate::backend::error::BackendError;
use crate::identity::AuthService;

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - If the body is unreadable or a field is malformed
/// * `401 Unauthorized` - If user is not found or password is incorrect
/// * `500 Internal Server Error` - If the store or token signing fails
///
/// # Example Response
///
/// ```json
/// { "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..." }
/// ```
pub async fn signin(
    State(auth): State<AuthService>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TokenResponse>), BackendError> {
    let Json(request) = payload.map_err(|e| {
        tracing::warn!("Unreadable signin body: {}", e);
        BackendError::bad_request()
    })?;
    request.validate()?;

    let token = auth.login(&request.email, &request.password).await?;

    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}
