//! Shared helper utilities for factory methods.
//!
//! This module provides common utilities used across all factory modules,
//! including ID generation and convenience methods for creating entities
//! with their dependencies.

use entity::sea_orm_active_enums::UserRole;
use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates an owner, an approved and active listing, and one room type.
///
/// The room type has 2 rooms at a nightly price of 1000.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((owner, pg, room_type))` - Tuple of all created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_listing(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::pg::Model,
        entity::room_type::Model,
    ),
    DbErr,
> {
    let owner = crate::factory::user::UserFactory::new(db)
        .role(UserRole::Owner)
        .build()
        .await?;
    let pg = crate::factory::pg::create_pg(db, owner.id).await?;
    let room_type = crate::factory::room_type::create_room_type(db, pg.id).await?;

    Ok((owner, pg, room_type))
}

/// Creates a listing plus a guest with one pending booking on it.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((guest, pg, room_type, booking))` - Tuple of created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_booking_with_dependencies(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::pg::Model,
        entity::room_type::Model,
        entity::booking::Model,
    ),
    DbErr,
> {
    let (_owner, pg, room_type) = create_listing(db).await?;
    let guest = crate::factory::user::create_user(db).await?;
    let booking = crate::factory::booking::create_booking(db, guest.id, pg.id, room_type.id).await?;

    Ok((guest, pg, room_type, booking))
}
