//! HTTP request handlers: thin pass-through from routes to services.

pub mod departament;
pub mod health;
pub mod login;
pub mod openapi;

pub use departament::*;
pub use health::*;
pub use login::*;
pub use openapi::*;
