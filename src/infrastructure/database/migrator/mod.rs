//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240402_000001_create_system_user;
mod m20240402_000002_create_system_user_role;
mod m20240402_000003_create_system_role;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240402_000001_create_system_user::Migration),
            Box::new(m20240402_000002_create_system_user_role::Migration),
            Box::new(m20240402_000003_create_system_role::Migration),
        ]
    }
}
