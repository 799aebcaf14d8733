//! idgate - Main Library
//!
//! idgate is a small identity service: it registers users, verifies their
//! credentials, issues signed session tokens and lets an authenticated user
//! read or change their own profile.
//!
//! # Module Structure
//!
//! - **`identity`** - The identity core, independent of HTTP
//!   - bcrypt password hashing
//!   - JWT session tokens with an injectable clock
//!   - `IdentityStore` contract and an in-memory implementation
//!   - `AuthService` orchestration and the `AuthError` taxonomy
//!
//! - **`shared`** - Configuration and shared error types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server with signup, signin and `/users/me`
//!   - Postgres identity store
//!
//! # Feature Flags
//!
//! - **`ssr`** - Enables the Axum server and Postgres persistence (default)
//!
//! # Usage
//!
//! ```rust,no_run
//! use idgate::backend::server::create_app;
//! use idgate::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(&config).await?;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! `AuthService` is cheap to clone and safe to share between request tasks.
//! Stores are `Send + Sync` and make the email uniqueness check atomic with
//! the write.

/// Configuration and shared error types
pub mod shared;

/// Identity core
pub mod identity;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
