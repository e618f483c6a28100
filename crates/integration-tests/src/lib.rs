//! Integration tests for Rolodex.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p rolodex-integration-tests
//! ```
//!
//! Tests build the full axum application in process and drive it with
//! `tower::ServiceExt::oneshot` against a temporary file-backed SQLite
//! database. No server or external database is required.
//!
//! The database must be file-backed: the gateway opens a fresh connection
//! per request, and an in-memory SQLite database is private to a single
//! connection.
