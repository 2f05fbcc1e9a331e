//! Create `complaint` table with FKs to order and user.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Complaint::Table)
                    .if_not_exists()
                    .col(pk_auto(Complaint::Id))
                    .col(text(Complaint::Message).not_null())
                    .col(timestamp_with_time_zone(Complaint::DatePosted).not_null())
                    .col(boolean(Complaint::Resolved).not_null().default(false))
                    .col(string_len_null(Complaint::ActionTaken, 100))
                    .col(integer(Complaint::OrderId).not_null())
                    .col(integer(Complaint::UserId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_complaint_order")
                            .from(Complaint::Table, Complaint::OrderId)
                            .to(Order::Table, Order::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_complaint_user")
                            .from(Complaint::Table, Complaint::UserId)
                            .to(User::Table, User::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Complaint::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Complaint { Table, Id, Message, DatePosted, Resolved, ActionTaken, OrderId, UserId }

#[derive(DeriveIden)]
enum Order { Table, Id }

#[derive(DeriveIden)]
enum User { Table, Id }
