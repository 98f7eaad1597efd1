//! HTTP REST API interfaces
//!
//! - `common`: response envelope, error rendering, validated JSON
//! - `middleware`: bearer-token authentication
//! - `modules`: handlers grouped by resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::{create_api_router, AppState};
