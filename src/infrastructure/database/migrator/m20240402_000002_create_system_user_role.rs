//! Create system_user_role table migration

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SystemUserRole::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SystemUserRole::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SystemUserRole::UserId).big_integer().not_null())
                    .col(ColumnDef::new(SystemUserRole::RoleId).big_integer().not_null())
                    .col(
                        ColumnDef::new(SystemUserRole::CreateTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SystemUserRole::UpdateTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_role_id")
                    .table(SystemUserRole::Table)
                    .col(SystemUserRole::UserId)
                    .col(SystemUserRole::RoleId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SystemUserRole::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum SystemUserRole {
    Table,
    Id,
    UserId,
    RoleId,
    CreateTime,
    UpdateTime,
}
