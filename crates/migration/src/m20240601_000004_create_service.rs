//! Create `service` table with FKs to user (creator), service_provider
//! and category.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Service::Table)
                    .if_not_exists()
                    .col(pk_auto(Service::Id))
                    .col(string_len(Service::Title, 100).not_null())
                    .col(text(Service::Description).not_null())
                    .col(timestamp_with_time_zone(Service::DatePosted).not_null())
                    .col(integer(Service::Ratings).not_null().default(0))
                    .col(integer(Service::Duration).not_null())
                    .col(double(Service::Price).not_null())
                    .col(integer(Service::UserId).not_null())
                    .col(integer(Service::ProviderId).not_null())
                    .col(integer(Service::CategoryId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_user")
                            .from(Service::Table, Service::UserId)
                            .to(User::Table, User::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_provider")
                            .from(Service::Table, Service::ProviderId)
                            .to(ServiceProvider::Table, ServiceProvider::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_category")
                            .from(Service::Table, Service::CategoryId)
                            .to(Category::Table, Category::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Service::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Service { Table, Id, Title, Description, DatePosted, Ratings, Duration, Price, UserId, ProviderId, CategoryId }

#[derive(DeriveIden)]
enum User { Table, Id }

#[derive(DeriveIden)]
enum ServiceProvider { Table, Id }

#[derive(DeriveIden)]
enum Category { Table, Id }
