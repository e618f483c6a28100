//! Gateway configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `ROLODEX_DATABASE_URL` - SQLite connection string (default: `sqlite://rolodex.db`;
//!   falls back to `DATABASE_URL` before the default)
//! - `ROLODEX_HOST` - Bind address (default: 127.0.0.1)
//! - `ROLODEX_PORT` - Listen port (default: 3000)

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://rolodex.db";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Gateway application configuration.
///
/// Passed into the gateway at construction; there is no module-level global.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// SQLite database connection URL
    pub database_url: String,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `ROLODEX_HOST` or `ROLODEX_PORT` is set but
    /// unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("ROLODEX_DATABASE_URL");
        let host = get_env_or_default("ROLODEX_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ROLODEX_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("ROLODEX_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ROLODEX_PORT".to_string(), e.to_string()))?;

        Ok(Self {
            database_url,
            host,
            port,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get the database URL with fallback to generic `DATABASE_URL`, then to the
/// local-file default the service was originally deployed with.
fn get_database_url(primary_key: &str) -> String {
    if let Ok(value) = std::env::var(primary_key) {
        return value;
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return value;
    }
    DEFAULT_DATABASE_URL.to_string()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
