//! Room type fixtures.

use entity::{room_type, sea_orm_active_enums::RoomKind};

/// Creates a single room type with 2 rooms at 1000 per night on listing `1`.
pub fn entity() -> room_type::Model {
    room_type::Model {
        id: 1,
        pg_id: 1,
        position: 0,
        kind: RoomKind::Single,
        price: 1000,
        deposit: 0,
        total_rooms: 2,
        available_rooms: 2,
    }
}
