use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260101_000001_create_user_table::User, m20260101_000002_create_pg_table::Pg,
    m20260101_000004_create_room_type_table::RoomType,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Booking::Table)
                    .if_not_exists()
                    .col(pk_auto(Booking::Id))
                    .col(integer(Booking::UserId))
                    .col(integer(Booking::PgId))
                    .col(integer(Booking::RoomTypeId))
                    .col(timestamp(Booking::CheckIn))
                    .col(timestamp(Booking::CheckOut))
                    .col(integer(Booking::Guests))
                    .col(big_integer(Booking::TotalAmount))
                    .col(string_len(Booking::BookingStatus, 16).default("pending"))
                    .col(string_len(Booking::PaymentStatus, 16).default("pending"))
                    .col(text_null(Booking::SpecialRequests))
                    .col(text_null(Booking::CancellationReason))
                    .col(timestamp_null(Booking::CancelledAt))
                    .col(timestamp(Booking::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Booking::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_user_id")
                            .from(Booking::Table, Booking::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_pg_id")
                            .from(Booking::Table, Booking::PgId)
                            .to(Pg::Table, Pg::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_room_type_id")
                            .from(Booking::Table, Booking::RoomTypeId)
                            .to(RoomType::Table, RoomType::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Overlap scans filter on the room type and then range-compare the window.
        manager
            .create_index(
                Index::create()
                    .name("idx_booking_overlap")
                    .table(Booking::Table)
                    .col(Booking::PgId)
                    .col(Booking::RoomTypeId)
                    .col(Booking::CheckIn)
                    .col(Booking::CheckOut)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_booking_user_id")
                    .table(Booking::Table)
                    .col(Booking::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Booking::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Booking {
    Table,
    Id,
    UserId,
    PgId,
    RoomTypeId,
    CheckIn,
    CheckOut,
    Guests,
    TotalAmount,
    BookingStatus,
    PaymentStatus,
    SpecialRequests,
    CancellationReason,
    CancelledAt,
    CreatedAt,
    UpdatedAt,
}
