//! API Routes
//!
//! Configures the Axum router with all recipes endpoints.

use std::time::Duration;

use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, put, MethodRouter},
    Json, Router,
};
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::handlers::{
    create_recipe_handler, delete_recipe_handler, health_handler, list_recipes_handler,
    search_recipes_handler, update_recipe_handler, AppState,
};

/// Default per-request deadline used by [`create_router`].
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Creates the main router with all endpoints and the default request timeout.
pub fn create_router(state: AppState) -> Router {
    create_router_with_timeout(state, DEFAULT_REQUEST_TIMEOUT)
}

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /recipes` - Create a recipe
/// - `GET /recipes` - List all recipes
/// - `PUT /recipes/:id` - Replace a recipe
/// - `DELETE /recipes/:id` - Delete a recipe
/// - `GET /recipes/search?tag=X` - Search recipes by tag
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
/// - Timeout: Reads running longer than `request_timeout` get a 408.
///   Writes have no deadline: dropping a handler future does not stop its
///   store call, so a timed-out write would still be applied.
pub fn create_router_with_timeout(state: AppState, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Static "/recipes/search" takes priority over "/recipes/:id"
    Router::new()
        .route(
            "/recipes",
            with_deadline(get(list_recipes_handler), request_timeout)
                .post(create_recipe_handler),
        )
        .route(
            "/recipes/search",
            with_deadline(get(search_recipes_handler), request_timeout),
        )
        .route(
            "/recipes/:id",
            put(update_recipe_handler).delete(delete_recipe_handler),
        )
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Applies the request deadline to the methods already on `method_router`.
fn with_deadline(
    method_router: MethodRouter<AppState>,
    request_timeout: Duration,
) -> MethodRouter<AppState> {
    method_router
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::map_response(timeout_error_body))
}

/// Gives the empty 408 from `TimeoutLayer` the usual `{"error": ...}` body.
async fn timeout_error_body(response: Response) -> Response {
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }

    let body = Json(json!({
        "error": "Request timed out"
    }));
    (StatusCode::REQUEST_TIMEOUT, body).into_response()
}
