//! Shared test helpers
//!
//! Builds an `AuthService` over the in-memory store with a manual clock and
//! the cheapest bcrypt cost, and an HTTP router around it.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use idgate::identity::password::MIN_COST;
use idgate::identity::{
    AuthService, IdentityStore, ManualClock, MemoryIdentityStore, PasswordHasher, TokenService,
};

/// Secret used by every test service
pub const TEST_SECRET: &[u8] = b"integration-test-secret";

/// A service plus the handles tests need to poke at it
pub struct TestAuth {
    pub service: AuthService,
    pub clock: Arc<ManualClock>,
    pub store: Arc<MemoryIdentityStore>,
}

/// Create a service backed by a fresh in-memory store
pub fn test_auth() -> TestAuth {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
    ));
    let store = Arc::new(MemoryIdentityStore::new());
    let tokens = TokenService::new(TEST_SECRET, chrono::Duration::days(7), clock.clone());
    let hasher = PasswordHasher::new(MIN_COST).expect("minimum cost is valid");

    let service = AuthService::new(store.clone() as Arc<dyn IdentityStore>, hasher, tokens);

    TestAuth {
        service,
        clock,
        store,
    }
}

/// Build the full HTTP router around a test service
#[cfg(feature = "ssr")]
pub fn test_router(auth: &TestAuth) -> axum::Router {
    use idgate::backend::routes::create_router;
    use idgate::backend::server::AppState;

    create_router(AppState::new(auth.service.clone()))
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}
