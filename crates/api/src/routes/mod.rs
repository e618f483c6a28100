//! HTTP route handlers for the user resource gateway.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                  - Liveness check
//! GET    /health/ready            - Readiness check (probes the store)
//!
//! # Users
//! GET    /api/users               - List all users
//! GET    /api/users/{id}          - Get a user by id
//! POST   /api/users/add           - Create a user
//! PUT    /api/users/update        - Full update (all five mutable fields)
//! PATCH  /api/users/patch/{id}    - Partial update (subset of fields)
//! DELETE /api/users/delete/{id}   - Delete a user by id
//! ```

pub mod users;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get, patch, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the user resource router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(users::index))
        .route("/{id}", get(users::show))
        .route("/add", post(users::create))
        .route("/update", put(users::update))
        .route("/patch/{id}", patch(users::patch))
        .route("/delete/{id}", delete(users::destroy))
}

/// Create all routes for the gateway.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/api/users", user_routes())
}

/// Build the complete application, layers included.
///
/// CORS is permissive on every route: the gateway is a reference CRUD surface
/// consumed from arbitrary origins.
pub fn app(state: AppState) -> Router {
    routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies store connectivity before returning OK.
/// Returns 503 Service Unavailable if the store is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    let probe = async {
        let mut conn = state.db().connect().await?;
        sqlx::query("SELECT 1").execute(&mut conn).await
    };

    match probe.await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
