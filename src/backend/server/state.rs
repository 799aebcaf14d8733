/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Thread Safety
 *
 * `AuthService` is cheap to clone and holds no mutable state of its own;
 * the identity store behind it provides its own concurrency control.
 *
 * # Example
 *
 * ```rust,no_run
 * use idgate::identity::AuthService;
 * use axum::extract::State;
 *
 * async fn handler(State(auth): State<AuthService>) {
 *     // Use the identity core
 * }
 * ```
 */

use axum::extract::FromRef;

use crate::identity::AuthService;

/// Shared state for all handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
}

impl AppState {
    pub fn new(auth: AuthService) -> Self {
        Self { auth }
    }
}

impl FromRef<AppState> for AuthService {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}
