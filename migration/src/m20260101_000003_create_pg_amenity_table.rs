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
                    .table(PgAmenity::Table)
                    .if_not_exists()
                    .col(pk_auto(PgAmenity::Id))
                    .col(integer(PgAmenity::PgId))
                    .col(string(PgAmenity::Name))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pg_amenity_pg_id")
                            .from(PgAmenity::Table, PgAmenity::PgId)
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
                    .name("idx_pg_amenity_pg_id_name")
                    .table(PgAmenity::Table)
                    .col(PgAmenity::PgId)
                    .col(PgAmenity::Name)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PgAmenity::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PgAmenity {
    Table,
    Id,
    PgId,
    Name,
}
