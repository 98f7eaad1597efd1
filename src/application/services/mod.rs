pub mod crud;
pub mod role;
pub mod user;

pub use crud::CrudService;
pub use role::RoleService;
pub use user::UserService;
