//! Business logic for departaments and login.

pub mod departament;
pub mod login;

pub use departament::*;
pub use login::*;
