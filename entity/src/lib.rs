//! SeaORM entities for the PG stay booking backend.

pub mod prelude;

pub mod booking;
pub mod payment;
pub mod pg;
pub mod pg_amenity;
pub mod review;
pub mod room_type;
pub mod sea_orm_active_enums;
pub mod user;
