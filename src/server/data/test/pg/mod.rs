use crate::{
    model::admin::ModerationFilter,
    server::{
        data::pg::PgRepository,
        model::pg::{CreatePgParams, PgSort, RoomTypeParams, SearchPgParams, SortField},
        util::pagination::PageRequest,
    },
};
use chrono::Utc;
use entity::sea_orm_active_enums::{GenderPreference, RoomKind};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod search;
mod update_rating;

fn room(kind: RoomKind, price: i64, total_rooms: i32) -> RoomTypeParams {
    RoomTypeParams {
        id: None,
        kind,
        price,
        deposit: 0,
        total_rooms,
    }
}
