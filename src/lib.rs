//! Departament API - a REST backend with JWT login and cached CRUD
//!
//! A small service built with Actix Web and Paperclip exposing:
//! - JWT login with demo credentials
//! - CRUD for the `Departament` entity over PostgreSQL
//! - A process-local list cache with synchronous invalidation on writes
//! - A uniform result envelope on every endpoint (always HTTP 200)
//!
//! ## Architecture
//!
//! The codebase is organized into focused modules:
//! - `models/` - Entities, transfer objects, the result envelope, audit events
//! - `repository/` - Generic repository + unit-of-work traits with PostgreSQL
//!   and in-memory implementations
//! - `cache` - TTL key→value cache used for list reads
//! - `services/` - Departament and login business logic
//! - `handlers/` - HTTP pass-through handlers and the app factory
//! - `middleware/` - Bearer-token guard
//! - `auth` - JWT build/validate helpers
//! - `config/` - Configuration structures and environment loading

// Core modules
pub mod auth;
pub mod cache;
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod services;
pub mod utils;

// Re-export commonly used types and functions for convenience
pub use cache::{MemoryCache, DEPARTAMENT_LIST_KEY};
pub use config::{CacheConfig, JwtConfig, ServerConfig};
pub use handlers::{create_app, create_openapi_spec};
pub use middleware::JwtAuth;
pub use models::{
    AuthAuditEvent, AuthEventType, Departament, DepartamentDto, HealthResponse, LoginDto,
    ResultModel,
};
pub use repository::{
    Entity, MemoryRepository, MemoryUnitOfWork, PgDepartamentRepository, PgUnitOfWork,
    Repository, RepositoryError, UnitOfWork,
};
pub use services::{DepartamentService, LoginService};
pub use utils::{extract_client_ip, extract_user_agent};
