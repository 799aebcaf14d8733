/**
 * Current User Handlers
 *
 * GET /users/me and PATCH /users/me. Both sit behind `auth_middleware`,
 * which has already turned the bearer token into an `AuthUser`.
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

use crate::backend::auth::handlers::types::{UpdateProfileRequest, UserResponse};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::identity::{AuthError, AuthService};

/// Get current user handler
///
/// # Errors
///
/// * `400 Bad Request` - If the token's subject is not a valid id
/// * `404 Not Found` - If the user no longer exists
pub async fn get_me(
    State(auth): State<AuthService>,
    AuthUser(user): AuthUser,
) -> Result<Json<UserResponse>, BackendError> {
    let record = auth.get_self(&user.user_id).await?.ok_or_else(|| {
        tracing::warn!("Authenticated user has no record: {}", user.user_id);
        AuthError::user_not_found()
    })?;

    Ok(Json(record.into()))
}

/// Update current user handler
///
/// # Errors
///
/// * `400 Bad Request` - If the body or a field is malformed
/// * `404 Not Found` - If the user no longer exists
/// * `409 Conflict` - If the email belongs to another user
pub async fn update_me(
    State(auth): State<AuthService>,
    AuthUser(user): AuthUser,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, BackendError> {
    let Json(request) = payload.map_err(|e| {
        tracing::warn!("Unreadable profile update body: {}", e);
        BackendError::bad_request()
    })?;
    request.validate()?;

    let record = auth
        .update_profile(&user.user_id, &request.email, &request.name)
        .await?;

    Ok(Json(record.into()))
}
