//! Role aggregate

mod dto;

pub use dto::{RoleCreateCmd, RoleQuery, RoleUpdateCmd};
