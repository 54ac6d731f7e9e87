use sea_orm_migration::{prelude::*, schema::*};

use super::m20260101_000002_create_pg_table::Pg;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RoomType::Table)
                    .if_not_exists()
                    .col(pk_auto(RoomType::Id))
                    .col(integer(RoomType::PgId))
                    .col(integer(RoomType::Position))
                    .col(string_len(RoomType::Kind, 16))
                    .col(big_integer(RoomType::Price))
                    .col(big_integer(RoomType::Deposit).default(0))
                    .col(integer(RoomType::TotalRooms))
                    .col(integer(RoomType::AvailableRooms))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_room_type_pg_id")
                            .from(RoomType::Table, RoomType::PgId)
                            .to(Pg::Table, Pg::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_room_type_pg_id")
                    .table(RoomType::Table)
                    .col(RoomType::PgId)
                    .col(RoomType::Position)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RoomType::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum RoomType {
    Table,
    Id,
    PgId,
    Position,
    Kind,
    Price,
    Deposit,
    TotalRooms,
    AvailableRooms,
}
