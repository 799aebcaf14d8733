/**
 * API Routes
 *
 * # Routes
 *
 * ## Public
 * - `POST /signup` - User registration
 * - `POST /signin` - User login
 *
 * ## Authenticated
 * - `GET /users/me` - Current user info
 * - `PATCH /users/me` - Update email and name
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::backend::auth::{get_me, signin, signup, update_me};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// The `/users` routes require a JWT token in the `Authorization` header;
/// `auth_middleware` rejects the request before the handler runs otherwise.
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let users = Router::new()
        .route("/users/me", get(get_me).patch(update_me))
        .route_layer(from_fn_with_state(app_state.clone(), auth_middleware));

    router
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .merge(users)
}
