use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::RoomKind;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "room_type")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub pg_id: i32,
    pub position: i32,
    pub kind: RoomKind,
    /// Nightly rate in whole currency units.
    pub price: i64,
    pub deposit: i64,
    pub total_rooms: i32,
    /// Rooms not held by an active booking today. Refreshed on every booking
    /// mutation; never used to admit a reservation.
    pub available_rooms: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pg::Entity",
        from = "Column::PgId",
        to = "super::pg::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Pg,
    #[sea_orm(has_many = "super::booking::Entity")]
    Booking,
}

impl Related<super::pg::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pg.def()
    }
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Booking.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
