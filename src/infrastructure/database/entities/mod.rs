//! Database entities module

pub mod role;
pub mod user;
pub mod user_role;

pub use role::Entity as Role;
pub use user::Entity as User;
pub use user_role::Entity as UserRole;

use chrono::Utc;
use sea_orm::{ActiveValue, Set};

/// Stamp `create_time` on first insert and `update_time` on every save.
pub(crate) fn stamp_times(
    create_time: &mut ActiveValue<chrono::DateTime<Utc>>,
    update_time: &mut ActiveValue<chrono::DateTime<Utc>>,
    insert: bool,
) {
    let now = Utc::now();
    if insert && create_time.is_not_set() {
        *create_time = Set(now);
    }
    *update_time = Set(now);
}
