//! # Admin Service
//!
//! CRUD admin backend for users and roles with JWT sessions, Excel
//! import/export and health probes.
//!
//! ## Architecture
//!
//! - **domain**: commands, queries and response types
//! - **application**: user, role and generic CRUD services
//! - **infrastructure**: database entities and mappers, cache, crypto, Excel
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: errors, pagination and shutdown plumbing

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, resolve_config_path, AppConfig};

pub use infrastructure::{create_cache, init_database, DatabaseConfig, SharedCache};

pub use interfaces::http::{create_api_router, AppState};
