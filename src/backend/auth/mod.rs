//! Authentication Module
//!
//! HTTP handlers for registration, login and the current user, plus the
//! Postgres implementation of `IdentityStore`.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - Postgres identity store
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Signup**: email, password and name → user created → `{id, email, name}`
//! 2. **Signin**: email and password → credentials verified → `{token}`
//! 3. **Me**: bearer token → token verified → user info read or updated
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - JWT tokens are used for stateless authentication
//! - Tokens expire after 7 days
//! - Invalid credentials return 401 (no information leakage)

/// Postgres identity store
pub mod users;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::types::{LoginRequest, SignupRequest, TokenResponse, UpdateProfileRequest, UserResponse};
pub use handlers::{get_me, signin, signup, update_me};
pub use users::PgIdentityStore;
