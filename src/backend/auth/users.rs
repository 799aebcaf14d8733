/**
 * Postgres Identity Store
 *
 * This module implements `IdentityStore` on top of a Postgres `users` table.
 *
 * # Uniqueness
 *
 * Email uniqueness comes from the table's `UNIQUE (email)` constraint, so
 * concurrent inserts are arbitrated by the database. Unique violations
 * surface as `StoreError::DuplicateKey`, check and not-null violations as
 * `StoreError::Validation`. Validators also run before each write so obvious
 * shape errors never reach the database.
 */

use async_trait::async_trait;
use chrono::Utc;
use sqlx::error::ErrorKind;
use sqlx::PgPool;
use uuid::Uuid;

use crate::identity::store::{
    CredentialRecord, IdentityStore, NewUser, ProfileUpdate, StoreError, UserRecord,
};
use crate::identity::validation::{validate_email, validate_name};
use crate::shared::SharedError;

/// User row without credentials
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    name: String,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            name: row.name,
        }
    }
}

/// User row with the bcrypt hash
#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: Uuid,
    email: String,
    name: String,
    password_hash: String,
}

impl From<CredentialRow> for CredentialRecord {
    fn from(row: CredentialRow) -> Self {
        Self {
            user: UserRecord {
                id: row.id,
                email: row.email,
                name: row.name,
            },
            password_hash: row.password_hash,
        }
    }
}

/// Postgres-backed `IdentityStore`
#[derive(Debug, Clone)]
pub struct PgIdentityStore {
    pool: PgPool,
}

impl PgIdentityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Map a database error onto the store contract
fn map_db_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.kind() {
            ErrorKind::UniqueViolation => return StoreError::duplicate_email(),
            ErrorKind::CheckViolation | ErrorKind::NotNullViolation => {
                return StoreError::Validation(SharedError::validation(
                    db_err.constraint().unwrap_or("users"),
                    db_err.message().to_string(),
                ));
            }
            _ => {}
        }
    }
    StoreError::backend(err)
}

#[async_trait]
impl IdentityStore for PgIdentityStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let user = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, name
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(user.map(Into::into))
    }

    async fn find_by_email_with_credentials(
        &self,
        email: &str,
    ) -> Result<Option<CredentialRecord>, StoreError> {
        let user = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT id, email, name, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(user.map(Into::into))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        let user = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, name
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(user.map(Into::into))
    }

    async fn create(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        validate_email(&user.email)?;
        validate_name(&user.name)?;

        let id = Uuid::new_v4();
        let now = Utc::now();

        let created = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, email, password_hash, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, email, name
            "#,
        )
        .bind(id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(created.into())
    }

    async fn update_by_id(&self, id: Uuid, update: ProfileUpdate) -> Result<UserRecord, StoreError> {
        validate_email(&update.email)?;
        validate_name(&update.name)?;

        let updated = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET email = $1, name = $2, updated_at = $3
            WHERE id = $4
            RETURNING id, email, name
            "#,
        )
        .bind(&update.email)
        .bind(&update.name)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        updated.map(Into::into).ok_or(StoreError::NotFound)
    }
}
