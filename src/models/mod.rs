//! Data models for the Departament API.
//!
//! Persisted entities, transfer objects, the uniform result envelope and
//! audit event types live here.

pub mod api;
pub mod audit;
pub mod departament;
pub mod login;
pub mod result;

pub use api::*;
pub use audit::*;
pub use departament::*;
pub use login::*;
pub use result::*;
