//! Create system_role table migration

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SystemRole::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SystemRole::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SystemRole::RoleName).string_len(32).not_null())
                    .col(
                        ColumnDef::new(SystemRole::RoleCode)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(SystemRole::Description).string_len(255).null())
                    .col(
                        ColumnDef::new(SystemRole::CreateTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SystemRole::UpdateTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SystemRole::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum SystemRole {
    Table,
    Id,
    RoleName,
    RoleCode,
    Description,
    CreateTime,
    UpdateTime,
}
