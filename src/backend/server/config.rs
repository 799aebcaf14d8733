/**
 * Server Configuration
 *
 * This module loads the optional PostgreSQL connection used by the
 * identity store.
 *
 * # Error Handling
 *
 * Database errors are logged but do not prevent server startup. When the
 * connection or the migrations fail, the server falls back to the
 * in-memory store rather than serve from a table it cannot trust.
 */

use sqlx::PgPool;

/// Database configuration result
///
/// Contains the database connection pool if successfully configured,
/// or `None` if the database is not available.
pub type DatabaseConfig = Option<PgPool>;

/// Load and initialize database connection pool
///
/// This function:
/// 1. Creates a PostgreSQL connection pool for `database_url`
/// 2. Runs database migrations
///
/// # Returns
///
/// - `Some(PgPool)` if database is successfully configured
/// - `None` if no URL is configured, the connection fails or migrations fail
pub async fn load_database(database_url: Option<&str>) -> DatabaseConfig {
    let Some(database_url) = database_url else {
        tracing::warn!("DATABASE_URL not set. Using the in-memory identity store.");
        return None;
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Using the in-memory identity store.");
            return None;
        }
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    if let Err(e) = sqlx::migrate!().run(&pool).await {
        tracing::error!("Failed to run database migrations: {}", e);
        tracing::warn!("Using the in-memory identity store.");
        return None;
    }

    tracing::info!("Database migrations completed successfully");
    Some(pool)
}
