//! User aggregate
//!
//! API-facing schemas for the `system_user` table: creation and update
//! commands, the login command, the query view and the Excel rows.

mod dto_create;
mod dto_excel;
mod dto_login;
mod dto_query;
mod dto_update;

pub use dto_create::{NewUser, UserCreateCmd};
pub use dto_excel::{UserExport, UserImport};
pub use dto_login::LoginCmd;
pub use dto_query::UserQuery;
pub use dto_update::UserUpdateCmd;

/// Cache key prefix for a user's current access token.
pub const USER_KEY_PREFIX: &str = "user:";

/// Cache key holding the access token of `user_id`.
pub fn user_cache_key(user_id: i64) -> String {
    format!("{USER_KEY_PREFIX}{user_id}")
}
