//! Create the `provider_service` association table.
//!
//! Pure many-to-many link; the composite primary key makes a
//! (service_id, service_provider_id) pair unique.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProviderService::Table)
                    .if_not_exists()
                    .col(integer(ProviderService::ServiceId).not_null())
                    .col(integer(ProviderService::ServiceProviderId).not_null())
                    .primary_key(
                        Index::create()
                            .col(ProviderService::ServiceId)
                            .col(ProviderService::ServiceProviderId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_provider_service_service")
                            .from(ProviderService::Table, ProviderService::ServiceId)
                            .to(Service::Table, Service::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_provider_service_provider")
                            .from(ProviderService::Table, ProviderService::ServiceProviderId)
                            .to(ServiceProvider::Table, ServiceProvider::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProviderService::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ProviderService { Table, ServiceId, ServiceProviderId }

#[derive(DeriveIden)]
enum Service { Table, Id }

#[derive(DeriveIden)]
enum ServiceProvider { Table, Id }
