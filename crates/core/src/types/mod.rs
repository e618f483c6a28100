//! Newtype wrappers shared across Rolodex crates.

pub mod id;

pub use id::*;
