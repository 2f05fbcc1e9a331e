//! Create `service_provider` table.
//!
//! The primary key is shared with `user.id` (is-a extension of a user).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceProvider::Table)
                    .if_not_exists()
                    .col(integer(ServiceProvider::Id).not_null().primary_key())
                    .col(string_len(ServiceProvider::Nid, 50).unique_key().not_null())
                    .col(text_null(ServiceProvider::Bio))
                    .col(double_null(ServiceProvider::Latitude))
                    .col(double_null(ServiceProvider::Longitude))
                    .col(boolean(ServiceProvider::Verified).not_null().default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_provider_user")
                            .from(ServiceProvider::Table, ServiceProvider::Id)
                            .to(User::Table, User::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ServiceProvider::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ServiceProvider { Table, Id, Nid, Bio, Latitude, Longitude, Verified }

#[derive(DeriveIden)]
enum User { Table, Id }
