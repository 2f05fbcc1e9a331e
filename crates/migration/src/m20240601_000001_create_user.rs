//! Create `user` table.
//!
//! Stores account holders; providers extend this table 1:1.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(string_len(User::Username, 20).not_null())
                    .col(string_len(User::Email, 120).unique_key().not_null())
                    .col(
                        string_len(User::ImageFile, 40)
                            .not_null()
                            .default("default.jpg"),
                    )
                    .col(string_len(User::PasswordHash, 120).not_null())
                    .col(boolean(User::IsAdmin).not_null().default(false))
                    .col(timestamp_with_time_zone(User::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(User::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum User { Table, Id, Username, Email, ImageFile, PasswordHash, IsAdmin, CreatedAt }
