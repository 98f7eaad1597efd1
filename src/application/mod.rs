//! Application layer: services composing mapper calls with business rules.

pub mod services;

pub use services::{CrudService, RoleService, UserService};
