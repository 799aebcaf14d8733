//! Identity Core
//!
//! Credential hashing, session tokens, the identity store contract and the
//! service that ties them together.
//!
//! # Module Structure
//!
//! ```text
//! identity/
//! ├── mod.rs          - Module exports and documentation
//! ├── password.rs     - bcrypt hashing and verification
//! ├── sessions.rs     - JWT session tokens and clocks
//! ├── store.rs        - IdentityStore trait and record types
//! ├── memory.rs       - In-memory IdentityStore
//! ├── validation.rs   - Field shape validators
//! ├── error.rs        - AuthError taxonomy
//! └── service.rs      - AuthService orchestration
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use idgate::identity::{AuthService, MemoryIdentityStore, PasswordHasher, TokenService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let auth = AuthService::new(
//!     Arc::new(MemoryIdentityStore::new()),
//!     PasswordHasher::default(),
//!     TokenService::with_secret(b"dev-secret"),
//! );
//!
//! let user = auth.register("a@x.com", "pw123456", "Ann").await?;
//! let token = auth.login("a@x.com", "pw123456").await?;
//! assert_eq!(auth.authenticate(&token)?, user.id.to_string());
//! # Ok(())
//! # }
//! ```

/// Password hashing
pub mod password;

/// Session tokens
pub mod sessions;

/// Identity store contract
pub mod store;

/// In-memory store
pub mod memory;

/// Field validators
pub mod validation;

/// Error taxonomy
pub mod error;

/// Orchestration
pub mod service;

pub use error::{AuthError, AuthErrorKind};
pub use memory::MemoryIdentityStore;
pub use password::{PasswordError, PasswordHasher};
pub use service::AuthService;
pub use sessions::{Clock, ManualClock, SessionClaim, SystemClock, TokenError, TokenService};
pub use store::{CredentialRecord, IdentityStore, NewUser, ProfileUpdate, StoreError, UserRecord};
