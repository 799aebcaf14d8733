/**
 * Identity Store Contract
 *
 * This module defines the persistence boundary for user records. The
 * `IdentityStore` trait is implemented by the in-memory store and, with the
 * `ssr` feature, by the Postgres store.
 *
 * # Contract
 *
 * - Email uniqueness is enforced by the store, atomically, on both create
 *   and update. A caller-side lookup beforehand is advisory only.
 * - Emails are compared byte-exactly.
 * - The password hash is only ever returned by
 *   `find_by_email_with_credentials`. Every other read yields a
 *   `UserRecord`, which has no hash field.
 * - Field validators are re-applied on every write.
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::shared::SharedError;

/// User record as seen outside the store
///
/// Safe to serialize into responses: there is no credential field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique user ID, assigned by the store
    pub id: Uuid,
    /// Login key, unique across all records
    pub email: String,
    /// Display name (2-30 chars)
    pub name: String,
}

/// User record together with its stored password hash
///
/// Only produced for login. Not `Serialize`, and `Debug` redacts the hash.
#[derive(Clone)]
pub struct CredentialRecord {
    pub user: UserRecord,
    pub password_hash: String,
}

impl std::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("user", &self.user)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// Fields for a new record
#[derive(Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
}

/// Mutable profile fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub email: String,
    pub name: String,
}

/// Store failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with the requested id
    #[error("Record not found")]
    NotFound,

    /// A unique key already belongs to another record
    #[error("Duplicate value for unique field '{field}'")]
    DuplicateKey {
        /// The colliding field
        field: &'static str,
    },

    /// A field failed the store's shape validators
    #[error(transparent)]
    Validation(#[from] SharedError),

    /// The call did not finish within the configured time limit
    #[error("Store call timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Anything else from the underlying backend
    #[error("Store backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    pub fn duplicate_email() -> Self {
        Self::DuplicateKey { field: "email" }
    }

    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(err))
    }
}

/// Persistence of user records keyed by unique email
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Look up a record by email, without its password hash
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Look up a record by email, including its password hash
    async fn find_by_email_with_credentials(
        &self,
        email: &str,
    ) -> Result<Option<CredentialRecord>, StoreError>;

    /// Look up a record by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError>;

    /// Create a record
    ///
    /// # Errors
    /// * `DuplicateKey` - the email is already present
    /// * `Validation` - a field failed the store's validators
    async fn create(&self, user: NewUser) -> Result<UserRecord, StoreError>;

    /// Replace email and name of an existing record
    ///
    /// # Errors
    /// * `NotFound` - no record with this id
    /// * `DuplicateKey` - the new email belongs to another record
    /// * `Validation` - a field failed the store's validators
    async fn update_by_id(&self, id: Uuid, update: ProfileUpdate) -> Result<UserRecord, StoreError>;
}
