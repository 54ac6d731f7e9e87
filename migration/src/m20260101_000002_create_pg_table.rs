use sea_orm_migration::{prelude::*, schema::*};

use super::m20260101_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pg::Table)
                    .if_not_exists()
                    .col(pk_auto(Pg::Id))
                    .col(integer(Pg::OwnerId))
                    .col(string(Pg::Name))
                    .col(text(Pg::Description))
                    .col(string(Pg::Address))
                    .col(string(Pg::City))
                    .col(string(Pg::State))
                    .col(string(Pg::Pincode))
                    .col(string_len(Pg::GenderPreference, 16).default("any"))
                    .col(boolean(Pg::IsApproved).default(false))
                    .col(boolean(Pg::IsActive).default(true))
                    .col(text_null(Pg::RejectionReason))
                    .col(double(Pg::Rating).default(0.0))
                    .col(integer(Pg::ReviewCount).default(0))
                    .col(timestamp(Pg::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Pg::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pg_owner_id")
                            .from(Pg::Table, Pg::OwnerId)
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
                    .name("idx_pg_owner_id")
                    .table(Pg::Table)
                    .col(Pg::OwnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pg_city")
                    .table(Pg::Table)
                    .col(Pg::City)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pg_listing_flags")
                    .table(Pg::Table)
                    .col(Pg::IsApproved)
                    .col(Pg::IsActive)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Pg::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Pg {
    Table,
    Id,
    OwnerId,
    Name,
    Description,
    Address,
    City,
    State,
    Pincode,
    GenderPreference,
    IsApproved,
    IsActive,
    RejectionReason,
    Rating,
    ReviewCount,
    CreatedAt,
    UpdatedAt,
}
