/**
 * Server Initialization
 *
 * This module wires configuration, the identity store and the identity core
 * into an Axum router.
 *
 * # Initialization Process
 *
 * 1. Load the database pool if `DATABASE_URL` is configured
 * 2. Pick the identity store (Postgres or in-memory)
 * 3. Build `AuthService` from configuration
 * 4. Create the router
 */

use std::sync::Arc;

use axum::Router;

use crate::backend::auth::users::PgIdentityStore;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::identity::{AuthService, Clock, IdentityStore, MemoryIdentityStore, SystemClock};
use crate::shared::{AppConfig, ConfigError};

/// Build the identity core from configuration
///
/// The signing secret is selected here, once, for the configured
/// environment.
pub fn build_auth_service(
    config: &AppConfig,
    store: Arc<dyn IdentityStore>,
    clock: Arc<dyn Clock>,
) -> Result<AuthService, ConfigError> {
    let hasher = config.password_hasher()?;
    let tokens = config.token_service(clock)?;

    Ok(AuthService::new(store, hasher, tokens).with_store_timeout(config.store_timeout))
}

/// Create and configure the Axum application
///
/// # Errors
///
/// Returns `ConfigError` if the configuration cannot produce a signing
/// secret or a valid hasher. Database problems are not errors: the server
/// falls back to the in-memory store.
pub async fn create_app(config: &AppConfig) -> Result<Router<()>, ConfigError> {
    tracing::info!("Initializing identity server ({:?})", config.environment);

    let store: Arc<dyn IdentityStore> = match load_database(config.database_url.as_deref()).await {
        Some(pool) => Arc::new(PgIdentityStore::new(pool)),
        None => {
            tracing::warn!("Records will be lost when the server stops");
            Arc::new(MemoryIdentityStore::new())
        }
    };

    let auth = build_auth_service(config, store, Arc::new(SystemClock))?;

    Ok(create_router(AppState::new(auth)))
}
