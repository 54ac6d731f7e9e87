//! Room availability derived from booking overlap.
//!
//! Free rooms are always computed as `total_rooms` minus the active bookings that
//! overlap the window. The `available_rooms` column is only a cache of that figure for
//! the current instant, rewritten by [`AvailabilityService::refresh_cache`] inside the
//! transaction of every booking or room type change.

use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, DbErr};

use crate::server::{
    data::{booking::BookingRepository, room_type::RoomTypeRepository},
    util::time::truncate_to_seconds,
};

pub struct AvailabilityService<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AvailabilityService<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Rooms of `room_type` not held by an active booking overlapping the window.
    ///
    /// Never negative, even when capacity was lowered below existing bookings.
    pub async fn free_rooms(
        &self,
        room_type: &entity::room_type::Model,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> Result<i64, DbErr> {
        let held = BookingRepository::new(self.db)
            .count_overlapping(room_type.pg_id, room_type.id, check_in, check_out)
            .await?;

        Ok((room_type.total_rooms as i64 - held as i64).max(0))
    }

    /// Recomputes and stores the rooms free at `now`.
    ///
    /// # Returns
    /// - `Ok(i32)` - The value written to the cache
    /// - `Err(DbErr)` - Database error during count or update
    pub async fn refresh_cache(
        &self,
        room_type: &entity::room_type::Model,
        now: DateTime<Utc>,
    ) -> Result<i32, DbErr> {
        let now = truncate_to_seconds(now);
        let free = self.free_rooms(room_type, now, now).await? as i32;

        RoomTypeRepository::new(self.db)
            .set_available_rooms(room_type.id, free)
            .await?;

        Ok(free)
    }
}
