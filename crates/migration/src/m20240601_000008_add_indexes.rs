use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Service: lookups by category and by provider
        manager
            .create_index(
                Index::create()
                    .name("idx_service_category")
                    .table(Service::Table)
                    .col(Service::CategoryId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_service_provider")
                    .table(Service::Table)
                    .col(Service::ProviderId)
                    .to_owned(),
            )
            .await?;

        // Order: customer and provider inbox queries
        manager
            .create_index(
                Index::create()
                    .name("idx_order_customer")
                    .table(Order::Table)
                    .col(Order::CustomerId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_order_provider")
                    .table(Order::Table)
                    .col(Order::ProviderId)
                    .to_owned(),
            )
            .await?;

        // Complaint: admin review by order
        manager
            .create_index(
                Index::create()
                    .name("idx_complaint_order")
                    .table(Complaint::Table)
                    .col(Complaint::OrderId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_service_category").table(Service::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_service_provider").table(Service::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_order_customer").table(Order::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_order_provider").table(Order::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_complaint_order").table(Complaint::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Service { Table, CategoryId, ProviderId }

#[derive(DeriveIden)]
enum Order { Table, CustomerId, ProviderId }

#[derive(DeriveIden)]
enum Complaint { Table, OrderId }
