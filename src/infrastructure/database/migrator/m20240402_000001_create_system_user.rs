//! Create system_user table migration

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SystemUser::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SystemUser::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SystemUser::Username).string_len(32).not_null())
                    .col(ColumnDef::new(SystemUser::Password).string_len(64).not_null())
                    .col(ColumnDef::new(SystemUser::Nickname).string_len(32).null())
                    .col(
                        ColumnDef::new(SystemUser::CreateTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SystemUser::UpdateTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_system_user_username")
                    .table(SystemUser::Table)
                    .col(SystemUser::Username)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SystemUser::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum SystemUser {
    Table,
    Id,
    Username,
    Password,
    Nickname,
    CreateTime,
    UpdateTime,
}
