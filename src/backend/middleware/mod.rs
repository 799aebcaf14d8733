//! Middleware Module
//!
//! This module contains HTTP middleware for the backend server.
//!
//! - **`auth`** - Bearer token authentication for protected routes
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware::from_fn_with_state, routing::get, Router};
//! use idgate::backend::middleware::auth_middleware;
//! use idgate::backend::server::AppState;
//!
//! # fn example(state: AppState) -> Router<AppState> {
//! Router::new()
//!     .route("/users/me", get(|| async { "me" }))
//!     .route_layer(from_fn_with_state(state, auth_middleware))
//! # }
//! ```

pub mod auth;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
