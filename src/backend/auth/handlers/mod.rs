//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for authentication and profile
//! endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types, payload validation
//! ├── signup.rs   - User registration handler
//! ├── login.rs    - User authentication handler
//! └── me.rs       - Current user read and update handlers
//! ```
//!
//! # Handlers
//!
//! - **`signup`** - POST /signup - User registration
//! - **`signin`** - POST /signin - User authentication
//! - **`get_me`** - GET /users/me - Current user info
//! - **`update_me`** - PATCH /users/me - Update email and name

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Login handler
pub mod login;

/// Current user handlers
pub mod me;

// Re-export commonly used types
pub use types::{LoginRequest, SignupRequest, TokenResponse, UpdateProfileRequest, UserResponse};

// Re-export handlers
pub use login::signin;
pub use me::{get_me, update_me};
pub use signup::signup;
