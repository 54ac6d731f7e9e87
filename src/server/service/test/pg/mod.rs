use crate::server::{
    error::{auth::AuthError, booking::BookingError, AppError},
    model::pg::{CreatePgParams, RoomTypeParams, UpdatePgParams},
    service::{admin::AdminService, lock::ReservationLocks, pg::PgService},
};
use chrono::Utc;
use entity::sea_orm_active_enums::{GenderPreference, RoomKind};
use test_utils::{builder::TestBuilder, factory};

mod update;

fn room(id: Option<i32>, kind: RoomKind, price: i64, total_rooms: i32) -> RoomTypeParams {
    RoomTypeParams {
        id,
        kind,
        price,
        deposit: 0,
        total_rooms,
    }
}
