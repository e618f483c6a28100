//! Rolodex Core - Shared types library.
//!
//! This crate provides common types used across all Rolodex components:
//! - `api` - User resource gateway (HTTP/JSON over SQLite)
//! - `integration-tests` - End-to-end tests against the gateway
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
