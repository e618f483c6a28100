//! Rolodex API - User resource gateway.
//!
//! This binary serves a minimal HTTP/JSON CRUD surface over a single SQLite
//! `users` table on port 3000.
//!
//! # Architecture
//!
//! - Axum web framework, one route per CRUD operation
//! - SQLite via sqlx; every request opens its own connection
//! - Schema bootstrapped idempotently at startup (no migrations)

#![cfg_attr(not(test), forbid(unsafe_code))]

use rolodex_api::config::ApiConfig;
use rolodex_api::db::Database;
use rolodex_api::routes;
use rolodex_api::state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = ApiConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rolodex_api=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Initialize the store connection factory
    let db = Database::new(&config.database_url).expect("Failed to parse database URL");

    // Create the users table if this is a fresh database
    db.init_schema().await.expect("Failed to initialize schema");
    tracing::info!("Database schema ready");

    // Build application state and router
    let state = AppState::new(config.clone(), db);
    let app = routes::app(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("rolodex-api listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
