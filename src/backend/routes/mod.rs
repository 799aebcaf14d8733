//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - Auth and profile routes
//! ```
//!
//! # Routes
//!
//! - `POST /signup` - User registration
//! - `POST /signin` - User login
//! - `GET /users/me` - Get current user
//! - `PATCH /users/me` - Update current user
//!
//! Anything else answers with a JSON 404.

/// Main router creation
pub mod router;

/// API endpoint handlers
pub mod api_routes;

// Re-export commonly used functions
pub use router::create_router;
