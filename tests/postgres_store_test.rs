//! Postgres identity store tests
//!
//! These need a running database:
//!
//! ```bash
//! DATABASE_URL=postgres://localhost/idgate_test cargo test --test postgres_store_test -- --ignored
//! ```

#![cfg(feature = "ssr")]

use assert_matches::assert_matches;
use idgate::backend::auth::PgIdentityStore;
use idgate::backend::server::config::load_database;
use idgate::identity::{IdentityStore, NewUser, ProfileUpdate, StoreError};
use pretty_assertions::assert_eq;
use sqlx::PgPool;
use uuid::Uuid;

fn database_url() -> String {
    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for Postgres tests")
}

async fn test_store() -> PgIdentityStore {
    let url = database_url();
    let pool = PgPool::connect(&url).await.expect("Failed to connect to test database");
    sqlx::migrate!().run(&pool).await.expect("Failed to run migrations");
    PgIdentityStore::new(pool)
}

fn unique_email() -> String {
    format!("test_{}@example.com", Uuid::new_v4())
}

fn new_user(email: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        password_hash: "$2b$04$abcdefghijklmnopqrstuuJ0bHUxWqb4Ue8S9t6G5v3u0nZqS5v1a".to_string(),
        name: "Test User".to_string(),
    }
}

#[tokio::test]
#[ignore]
async fn test_create_and_find() {
    let store = test_store().await;
    let email = unique_email();

    let created = store.create(new_user(&email)).await.unwrap();

    assert_eq!(store.find_by_email(&email).await.unwrap(), Some(created.clone()));
    assert_eq!(store.find_by_id(created.id).await.unwrap(), Some(created.clone()));

    let credentials = store
        .find_by_email_with_credentials(&email)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(credentials.user, created);
    assert!(credentials.password_hash.starts_with("$2b$"));
}

#[tokio::test]
#[ignore]
async fn test_duplicate_email_is_duplicate_key() {
    let store = test_store().await;
    let email = unique_email();

    store.create(new_user(&email)).await.unwrap();
    let err = store.create(new_user(&email)).await.unwrap_err();

    assert_matches!(err, StoreError::DuplicateKey { field: "email" });
}

#[tokio::test]
#[ignore]
async fn test_update_by_id() {
    let store = test_store().await;
    let created = store.create(new_user(&unique_email())).await.unwrap();
    let taken = store.create(new_user(&unique_email())).await.unwrap();

    let new_email = unique_email();
    let updated = store
        .update_by_id(
            created.id,
            ProfileUpdate {
                email: new_email.clone(),
                name: "Renamed".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.email, new_email);
    assert_eq!(updated.name, "Renamed");

    let conflict = store
        .update_by_id(
            created.id,
            ProfileUpdate {
                email: taken.email.clone(),
                name: "Renamed".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert_matches!(conflict, StoreError::DuplicateKey { .. });

    let missing = store
        .update_by_id(
            Uuid::new_v4(),
            ProfileUpdate {
                email: unique_email(),
                name: "Nobody".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert_matches!(missing, StoreError::NotFound);
}

#[tokio::test]
#[ignore]
async fn test_failed_migrations_fall_back_to_memory_store() {
    let url = database_url();
    let admin = PgPool::connect(&url).await.unwrap();
    let schema = format!("idgate_dirty_{}", Uuid::new_v4().simple());

    // A half-applied migration makes the migrator refuse to run
    sqlx::query(&format!("CREATE SCHEMA {schema}")).execute(&admin).await.unwrap();
    sqlx::query(&format!(
        "CREATE TABLE {schema}._sqlx_migrations (
            version BIGINT PRIMARY KEY,
            description TEXT NOT NULL,
            installed_on TIMESTAMPTZ NOT NULL DEFAULT now(),
            success BOOLEAN NOT NULL,
            checksum BYTEA NOT NULL,
            execution_time BIGINT NOT NULL
        )"
    ))
    .execute(&admin)
    .await
    .unwrap();
    sqlx::query(&format!(
        "INSERT INTO {schema}._sqlx_migrations (version, description, success, checksum, execution_time)
         VALUES (20240301000000, 'create users', FALSE, '\\x00', 0)"
    ))
    .execute(&admin)
    .await
    .unwrap();

    let separator = if url.contains('?') { '&' } else { '?' };
    let scoped = format!("{url}{separator}options=-c%20search_path%3D{schema}");
    let pool = load_database(Some(&scoped)).await;

    sqlx::query(&format!("DROP SCHEMA {schema} CASCADE"))
        .execute(&admin)
        .await
        .unwrap();

    assert!(pool.is_none());
}
