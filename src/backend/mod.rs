//! Backend Module
//!
//! This module contains the HTTP surface of the identity service: an Axum
//! server exposing registration, login and current-user endpoints on top of
//! the identity core, and a Postgres implementation of the identity store.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Handlers and Postgres store
//! ├── middleware/     - Bearer token middleware
//! └── error/          - Error types and responses
//! ```
//!
//! # Error Handling
//!
//! Handlers return `BackendError`, which maps identity outcomes onto
//! 400/401/404/409 and renders everything unexpected as a generic 500.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication handlers and persistence
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Re-export commonly used types
pub use error::BackendError;
pub use server::{create_app, AppState};
