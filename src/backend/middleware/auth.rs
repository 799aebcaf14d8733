/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It verifies the bearer token from the Authorization
 * header and provides the user ID to handlers.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::backend::error::BackendError;
use crate::identity::{AuthError, AuthService};

/// Authenticated user data extracted from JWT token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Token subject, as issued at login
    pub user_id: String,
}

/// Authentication middleware
///
/// This middleware:
/// 1. Reads the Authorization header
/// 2. Accepts only `Bearer <token>` and verifies the token
/// 3. Attaches the subject to request extensions for use in handlers
///
/// Every failure is the same 401.
pub async fn auth_middleware(
    State(auth): State<AuthService>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let user_id = auth.authenticate_header(header)?;

    request
        .extensions_mut()
        .insert(AuthenticatedUser { user_id });

    Ok(next.run(request).await)
}

/// Axum extractor for authenticated user
///
/// This can be used as a parameter in handlers to automatically extract
/// the authenticated user from request extensions.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::from(AuthError::authorization_required())
            })?;

        Ok(AuthUser(user))
    }
}
