//! Domain layer: API-facing schemas and commands for users and roles.

pub mod role;
pub mod token;
pub mod user;

pub use token::Token;
