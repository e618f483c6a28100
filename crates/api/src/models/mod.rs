//! Wire and row types for the user resource.

pub mod user;

pub use user::{NewUser, User, UserPatch};
