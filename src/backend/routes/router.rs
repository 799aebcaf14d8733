/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 */

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::backend::error::not_found;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// 1. **API Routes**: signup, signin, current user
/// 2. **Fallback Handler**: JSON 404 for unknown routes
/// 3. **Tracing**: one span per request
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = configure_api_routes(Router::new(), &app_state);

    router
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
