//! Configuration structures and loading utilities.
//!
//! Each concern gets its own struct with defaults and `from_env()` loading.

pub mod cache;
pub mod jwt;
pub mod server;

pub use cache::*;
pub use jwt::*;
pub use server::*;
