//! Roles module: role CRUD

pub mod handlers;

pub use handlers::*;
