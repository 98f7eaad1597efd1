//! Users module: authentication, user management and Excel import/export

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
