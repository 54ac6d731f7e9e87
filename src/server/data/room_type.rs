//! Room type data repository.
//!
//! Room types are owned by a listing and kept in display order through their
//! `position` column. The `available_rooms` column is a cache written only through
//! [`RoomTypeRepository::set_available_rooms`].

use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::server::model::pg::RoomTypeParams;

pub struct RoomTypeRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RoomTypeRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Finds a room type only if it belongs to `pg_id`.
    ///
    /// # Arguments
    /// - `pg_id` - Listing the room type must belong to
    /// - `room_type_id` - Room type id
    ///
    /// # Returns
    /// - `Ok(Some(Model))` - Room type found in that listing
    /// - `Ok(None)` - Unknown id or the room type belongs to another listing
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_in_pg(
        &self,
        pg_id: i32,
        room_type_id: i32,
    ) -> Result<Option<entity::room_type::Model>, DbErr> {
        entity::prelude::RoomType::find_by_id(room_type_id)
            .filter(entity::room_type::Column::PgId.eq(pg_id))
            .one(self.db)
            .await
    }

    /// Gets a listing's room types in display order.
    pub async fn get_by_pg(&self, pg_id: i32) -> Result<Vec<entity::room_type::Model>, DbErr> {
        entity::prelude::RoomType::find()
            .filter(entity::room_type::Column::PgId.eq(pg_id))
            .order_by_asc(entity::room_type::Column::Position)
            .order_by_asc(entity::room_type::Column::Id)
            .all(self.db)
            .await
    }

    /// Inserts a room type. The cache starts at `total_rooms` and is expected to be
    /// refreshed by the caller.
    pub async fn create(
        &self,
        pg_id: i32,
        position: i32,
        params: &RoomTypeParams,
    ) -> Result<entity::room_type::Model, DbErr> {
        entity::room_type::ActiveModel {
            pg_id: ActiveValue::Set(pg_id),
            position: ActiveValue::Set(position),
            kind: ActiveValue::Set(params.kind),
            price: ActiveValue::Set(params.price),
            deposit: ActiveValue::Set(params.deposit),
            total_rooms: ActiveValue::Set(params.total_rooms),
            available_rooms: ActiveValue::Set(params.total_rooms),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Overwrites kind, price, deposit, capacity and position of an existing room type.
    pub async fn update(
        &self,
        room_type: entity::room_type::Model,
        position: i32,
        params: &RoomTypeParams,
    ) -> Result<entity::room_type::Model, DbErr> {
        let mut active = room_type.into_active_model();
        active.position = ActiveValue::Set(position);
        active.kind = ActiveValue::Set(params.kind);
        active.price = ActiveValue::Set(params.price);
        active.deposit = ActiveValue::Set(params.deposit);
        active.total_rooms = ActiveValue::Set(params.total_rooms);
        active.update(self.db).await
    }

    pub async fn delete(&self, room_type_id: i32) -> Result<(), DbErr> {
        entity::prelude::RoomType::delete_by_id(room_type_id)
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Writes the cached count of rooms free right now.
    pub async fn set_available_rooms(
        &self,
        room_type_id: i32,
        available_rooms: i32,
    ) -> Result<(), DbErr> {
        entity::prelude::RoomType::update_many()
            .filter(entity::room_type::Column::Id.eq(room_type_id))
            .col_expr(
                entity::room_type::Column::AvailableRooms,
                Expr::value(available_rooms),
            )
            .exec(self.db)
            .await?;
        Ok(())
    }
}
