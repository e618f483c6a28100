//! Database operations for the gateway's SQLite store.
//!
//! # Tables
//!
//! - `users` - The only table; one row per directory user.
//!
//! # Connections
//!
//! There is no pool. `Database` is a connection factory: every repository
//! operation opens its own connection, runs its statement, and drops the
//! connection on every exit path. SQLite serializes conflicting writes itself.
//!
//! # Schema
//!
//! The schema is created idempotently at process start via [`Database::init_schema`];
//! there are no migrations.

pub mod users;

use std::str::FromStr;

use sqlx::ConnectOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};

pub use users::UserRepository;

/// SQL for the one table the gateway owns.
const CREATE_USERS_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS users (
    user_id INTEGER PRIMARY KEY NOT NULL,
    name    TEXT NOT NULL,
    email   TEXT NOT NULL,
    phone   TEXT NOT NULL,
    address TEXT NOT NULL,
    country TEXT NOT NULL
)";

/// Connection factory for the SQLite store.
///
/// Holds parsed connect options; cloning is cheap.
#[derive(Debug, Clone)]
pub struct Database {
    options: SqliteConnectOptions,
}

impl Database {
    /// Parse a SQLite connection URL into a factory.
    ///
    /// The database file is created on first connect if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the URL is not a valid SQLite connection string.
    pub fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        Ok(Self { options })
    }

    /// Open a fresh connection to the store.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the connection cannot be established.
    pub async fn connect(&self) -> Result<SqliteConnection, sqlx::Error> {
        self.options.connect().await
    }

    /// Create the `users` table if it does not exist.
    ///
    /// Called once at process start; safe to call again.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the statement fails.
    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        let mut conn = self.connect().await?;
        sqlx::query(CREATE_USERS_TABLE).execute(&mut conn).await?;
        Ok(())
    }
}
