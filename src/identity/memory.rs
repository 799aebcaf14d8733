/**
 * In-Memory Identity Store
 *
 * A process-local `IdentityStore`. All records live behind a single
 * `tokio::sync::RwLock`; uniqueness checks and inserts happen under the same
 * write guard, so two concurrent creations with one email cannot both win.
 *
 * Used by tests and by the server when no database is configured.
 */

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::identity::store::{
    CredentialRecord, IdentityStore, NewUser, ProfileUpdate, StoreError, UserRecord,
};
use crate::identity::validation::{validate_email, validate_name};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, CredentialRecord>,
    /// email -> id
    by_email: HashMap<String, Uuid>,
}

/// In-memory `IdentityStore`
#[derive(Default)]
pub struct MemoryIdentityStore {
    tables: RwLock<Tables>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.tables.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self
            .find_by_email_with_credentials(email)
            .await?
            .map(|record| record.user))
    }

    async fn find_by_email_with_credentials(
        &self,
        email: &str,
    ) -> Result<Option<CredentialRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .by_email
            .get(email)
            .and_then(|id| tables.users.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).map(|record| record.user.clone()))
    }

    async fn create(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        validate_email(&user.email)?;
        validate_name(&user.name)?;

        let mut tables = self.tables.write().await;
        if tables.by_email.contains_key(&user.email) {
            return Err(StoreError::duplicate_email());
        }

        let record = UserRecord {
            id: Uuid::new_v4(),
            email: user.email,
            name: user.name,
        };
        tables.by_email.insert(record.email.clone(), record.id);
        tables.users.insert(
            record.id,
            CredentialRecord {
                user: record.clone(),
                password_hash: user.password_hash,
            },
        );

        Ok(record)
    }

    async fn update_by_id(&self, id: Uuid, update: ProfileUpdate) -> Result<UserRecord, StoreError> {
        validate_email(&update.email)?;
        validate_name(&update.name)?;

        let mut tables = self.tables.write().await;
        let current_email = match tables.users.get(&id) {
            Some(record) => record.user.email.clone(),
            None => return Err(StoreError::NotFound),
        };

        if let Some(owner) = tables.by_email.get(&update.email) {
            if *owner != id {
                return Err(StoreError::duplicate_email());
            }
        }

        tables.by_email.remove(&current_email);
        tables.by_email.insert(update.email.clone(), id);

        let record = tables.users.get_mut(&id).ok_or(StoreError::NotFound)?;
        record.user.email = update.email;
        record.user.name = update.name;

        Ok(record.user.clone())
    }
}
