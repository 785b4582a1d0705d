//! Custom middleware for cross-cutting concerns.

pub mod auth;

pub use auth::*;
