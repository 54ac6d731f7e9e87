use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260101_000001_create_user_table::User, m20260101_000005_create_booking_table::Booking,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Payment::Table)
                    .if_not_exists()
                    .col(pk_auto(Payment::Id))
                    .col(integer(Payment::BookingId))
                    .col(integer(Payment::UserId))
                    .col(string_len(Payment::Gateway, 16))
                    .col(string_uniq(Payment::IntentId))
                    .col(string_null(Payment::GatewayPaymentId))
                    .col(big_integer(Payment::Amount))
                    .col(string_len(Payment::Currency, 8))
                    .col(string_len(Payment::Status, 16).default("created"))
                    .col(string_null(Payment::RefundId))
                    .col(big_integer_null(Payment::RefundedAmount))
                    .col(timestamp(Payment::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Payment::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_booking_id")
                            .from(Payment::Table, Payment::BookingId)
                            .to(Booking::Table, Booking::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_user_id")
                            .from(Payment::Table, Payment::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payment_booking_id")
                    .table(Payment::Table)
                    .col(Payment::BookingId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Payment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Payment {
    Table,
    Id,
    BookingId,
    UserId,
    Gateway,
    IntentId,
    GatewayPaymentId,
    Amount,
    Currency,
    Status,
    RefundId,
    RefundedAmount,
    CreatedAt,
    UpdatedAt,
}
