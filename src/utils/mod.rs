//! Utility helpers.

pub mod http;

pub use http::*;
