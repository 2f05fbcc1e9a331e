//! Create `order` table.
//!
//! Status and notification are string-backed closed enumerations with
//! database defaults `pending` / `not_viewed`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Order::Table)
                    .if_not_exists()
                    .col(pk_auto(Order::Id))
                    .col(string_len(Order::Location, 200).not_null())
                    .col(timestamp_with_time_zone(Order::OrderedAt).not_null())
                    .col(string_len(Order::Status, 20).not_null().default("pending"))
                    .col(text_null(Order::Review))
                    .col(integer_null(Order::Rate))
                    .col(double(Order::Price).not_null())
                    .col(
                        string_len(Order::Notification, 20)
                            .not_null()
                            .default("not_viewed"),
                    )
                    .col(double_null(Order::Latitude))
                    .col(double_null(Order::Longitude))
                    .col(integer(Order::ServiceId).not_null())
                    .col(integer(Order::CustomerId).not_null())
                    .col(integer(Order::ProviderId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_service")
                            .from(Order::Table, Order::ServiceId)
                            .to(Service::Table, Service::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_customer")
                            .from(Order::Table, Order::CustomerId)
                            .to(User::Table, User::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_provider")
                            .from(Order::Table, Order::ProviderId)
                            .to(ServiceProvider::Table, ServiceProvider::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Order::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Order { Table, Id, Location, OrderedAt, Status, Review, Rate, Price, Notification, Latitude, Longitude, ServiceId, CustomerId, ProviderId }

#[derive(DeriveIden)]
enum Service { Table, Id }

#[derive(DeriveIden)]
enum User { Table, Id }

#[derive(DeriveIden)]
enum ServiceProvider { Table, Id }
