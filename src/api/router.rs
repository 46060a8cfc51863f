use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::health;
use super::state::AppState;
use super::types::ApiError;
use super::users;

/// Create a minimal router without state (for probes only)
pub fn create_router() -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .layer(TraceLayer::new_for_http())
}

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints (no state needed)
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        // Account endpoints; the static search route must stay ahead of
        // the id capture
        .route("/users", post(users::create_user))
        .route("/users/search", get(users::search_users))
        .route(
            "/users/{user_id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/login", post(users::login))
        .fallback(no_route)
        .method_not_allowed_fallback(no_method)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn no_route() -> ApiError {
    ApiError::not_found("Path not found")
}

async fn no_method() -> ApiError {
    ApiError::method_not_allowed("Method not allowed")
}
