//! Room type factory.

use entity::sea_orm_active_enums::RoomKind;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating room types under an existing listing.
///
/// Defaults to a single room type with 2 rooms at 1000 per night.
pub struct RoomTypeFactory<'a> {
    db: &'a DatabaseConnection,
    pg_id: i32,
    position: i32,
    kind: RoomKind,
    price: i64,
    deposit: i64,
    total_rooms: i32,
}

impl<'a> RoomTypeFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, pg_id: i32) -> Self {
        Self {
            db,
            pg_id,
            position: 0,
            kind: RoomKind::Single,
            price: 1000,
            deposit: 0,
            total_rooms: 2,
        }
    }

    pub fn position(mut self, position: i32) -> Self {
        self.position = position;
        self
    }

    pub fn kind(mut self, kind: RoomKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn price(mut self, price: i64) -> Self {
        self.price = price;
        self
    }

    pub fn deposit(mut self, deposit: i64) -> Self {
        self.deposit = deposit;
        self
    }

    pub fn total_rooms(mut self, total_rooms: i32) -> Self {
        self.total_rooms = total_rooms;
        self
    }

    pub async fn build(self) -> Result<entity::room_type::Model, DbErr> {
        entity::room_type::ActiveModel {
            pg_id: ActiveValue::Set(self.pg_id),
            position: ActiveValue::Set(self.position),
            kind: ActiveValue::Set(self.kind),
            price: ActiveValue::Set(self.price),
            deposit: ActiveValue::Set(self.deposit),
            total_rooms: ActiveValue::Set(self.total_rooms),
            available_rooms: ActiveValue::Set(self.total_rooms),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a default room type for `pg_id`.
pub async fn create_room_type(
    db: &DatabaseConnection,
    pg_id: i32,
) -> Result<entity::room_type::Model, DbErr> {
    RoomTypeFactory::new(db, pg_id).build().await
}
