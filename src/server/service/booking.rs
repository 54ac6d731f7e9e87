//! Booking lifecycle service.
//!
//! Reservations are admitted by counting overlapping active bookings against the room
//! type's capacity. The count, the insert and the cache refresh run under the room
//! type's [`ReservationLocks`] entry and inside one database transaction, so two
//! requests for the last room cannot both see it free.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::{BookingStatus, UserRole};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::{
    model::booking::BookingListQuery,
    server::{
        data::{
            booking::{BookingRepository, BookingScope},
            pg::PgRepository,
            room_type::RoomTypeRepository,
        },
        error::{auth::AuthError, booking::BookingError, AppError},
        model::booking::{
            ensure_cancellable, ensure_transition, total_amount, validate_window, Availability,
            Booking, BookingCounts, CreateBookingParams, OwnerDashboard,
        },
        service::{availability::AvailabilityService, lock::ReservationLocks},
        util::{
            pagination::{Page, PageRequest},
            time::truncate_to_seconds,
        },
    },
};

/// Bookings shown on the owner dashboard.
const RECENT_BOOKINGS_LIMIT: u64 = 10;

pub struct BookingService<'a> {
    db: &'a DatabaseConnection,
    locks: &'a ReservationLocks,
}

impl<'a> BookingService<'a> {
    pub fn new(db: &'a DatabaseConnection, locks: &'a ReservationLocks) -> Self {
        Self { db, locks }
    }

    /// Checks availability and reserves one room.
    ///
    /// Validates the request, resolves the listing and room type, then under the room
    /// type's lock and a transaction counts overlapping active bookings, inserts the
    /// booking as pending and refreshes the availability cache.
    ///
    /// # Arguments
    /// - `params` - Reservation request from the guest
    /// - `now` - Current time, used for date validation and the cache
    ///
    /// # Returns
    /// - `Ok(Booking)` - The pending booking
    /// - `Err(AppError::BadRequest)` - Invalid dates, guests or notes
    /// - `Err(AppError::NotFound)` - Listing not publicly listed or room type not in it
    /// - `Err(AppError::BookingErr(RoomUnavailable))` - Every room is held for the window
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn create(
        &self,
        params: CreateBookingParams,
        now: DateTime<Utc>,
    ) -> Result<Booking, AppError> {
        let nights = params.validate(now)?;

        let pg = PgRepository::new(self.db)
            .find_by_id(params.pg_id)
            .await?
            .filter(|pg| pg.is_approved && pg.is_active)
            .ok_or_else(|| AppError::NotFound("PG not found".to_string()))?;

        let room_type = RoomTypeRepository::new(self.db)
            .find_in_pg(pg.id, params.room_type_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Room type not found".to_string()))?;

        if room_type.total_rooms < 1 {
            return Err(BookingError::RoomUnavailable.into());
        }

        let _guard = self.locks.acquire(pg.id, room_type.id).await;
        let txn = self.db.begin().await?;

        // Capacity may have changed while waiting for the lock.
        let room_type = RoomTypeRepository::new(&txn)
            .find_in_pg(pg.id, room_type.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Room type not found".to_string()))?;

        let availability = AvailabilityService::new(&txn);
        let free = availability
            .free_rooms(&room_type, params.check_in, params.check_out)
            .await?;
        if free < 1 {
            txn.rollback().await?;
            tracing::debug!(
                "Rejected booking for room type {} in PG {}: no rooms free",
                room_type.id,
                pg.id
            );
            return Err(BookingError::RoomUnavailable.into());
        }

        let amount = total_amount(room_type.price, nights)?;
        let booking = BookingRepository::new(&txn)
            .create(&params, amount, now)
            .await?;
        availability.refresh_cache(&room_type, now).await?;

        txn.commit().await?;

        tracing::info!(
            "Booking {} created by user {} for room type {} ({} nights)",
            booking.id,
            booking.user_id,
            booking.room_type_id,
            nights
        );

        Ok(Booking::from_entity(booking, Some(pg)))
    }

    /// Read-only availability check for a publicly listed room type.
    pub async fn availability(
        &self,
        pg_id: i32,
        room_type_id: i32,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Availability, AppError> {
        let check_in = truncate_to_seconds(check_in);
        let check_out = truncate_to_seconds(check_out);
        let nights = validate_window(check_in, check_out, now)?;

        PgRepository::new(self.db)
            .find_by_id(pg_id)
            .await?
            .filter(|pg| pg.is_approved && pg.is_active)
            .ok_or_else(|| AppError::NotFound("PG not found".to_string()))?;

        let room_type = RoomTypeRepository::new(self.db)
            .find_in_pg(pg_id, room_type_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Room type not found".to_string()))?;

        let free_rooms = AvailabilityService::new(self.db)
            .free_rooms(&room_type, check_in, check_out)
            .await?;

        Ok(Availability {
            free_rooms,
            total_rooms: room_type.total_rooms,
            nights,
            total_amount: total_amount(room_type.price, nights)?,
        })
    }

    /// Cancels a booking on behalf of its guest or an admin.
    ///
    /// Only pending or confirmed bookings with at least 24 hours left before check-in
    /// can be cancelled this way.
    ///
    /// # Arguments
    /// - `booking_id` - Booking to cancel
    /// - `actor` - Authenticated caller
    /// - `reason` - Optional cancellation reason
    /// - `now` - Current time for the notice window
    ///
    /// # Returns
    /// - `Ok(Booking)` - The cancelled booking
    /// - `Err(AppError::NotFound)` - No such booking
    /// - `Err(AppError::AuthErr(AccessDenied))` - Caller is neither the guest nor an admin
    /// - `Err(AppError::BookingErr(_))` - Booking not active or inside the notice window
    pub async fn cancel(
        &self,
        booking_id: i32,
        actor: &entity::user::Model,
        reason: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Booking, AppError> {
        let booking = self.find(booking_id).await?;

        if booking.user_id != actor.id && actor.role != UserRole::Admin {
            return Err(AuthError::AccessDenied(
                actor.id,
                format!("User cannot cancel booking {}", booking_id),
            )
            .into());
        }

        ensure_cancellable(&booking, now)?;

        let reason = reason.map(|r| r.trim().to_string()).filter(|r| !r.is_empty());
        let booking = self
            .transition(booking, BookingStatus::Cancelled, reason, now, |booking| {
                ensure_cancellable(booking, now)
            })
            .await?;

        tracing::info!("Booking {} cancelled by user {}", booking.id, actor.id);

        Ok(booking)
    }

    /// Moves a booking through its lifecycle on behalf of the listing owner or an admin.
    ///
    /// Cancellation through this path is not subject to the guest notice window.
    pub async fn update_status(
        &self,
        booking_id: i32,
        actor: &entity::user::Model,
        status: BookingStatus,
        reason: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Booking, AppError> {
        let booking = self.find(booking_id).await?;
        let pg = PgRepository::new(self.db)
            .find_by_id(booking.pg_id)
            .await?
            .ok_or_else(|| AppError::NotFound("PG not found".to_string()))?;

        if pg.owner_id != actor.id && actor.role != UserRole::Admin {
            return Err(AuthError::AccessDenied(
                actor.id,
                format!("User does not own the PG of booking {}", booking_id),
            )
            .into());
        }

        ensure_transition(booking.booking_status, status)?;

        let reason = reason.map(|r| r.trim().to_string()).filter(|r| !r.is_empty());
        let booking = self
            .transition(booking, status, reason, now, |booking| {
                ensure_transition(booking.booking_status, status)
            })
            .await?;

        tracing::info!(
            "Booking {} moved to {:?} by user {}",
            booking.id,
            status,
            actor.id
        );

        Ok(booking)
    }

    /// Gets a booking visible to its guest, the listing owner or an admin.
    pub async fn get(&self, booking_id: i32, actor: &entity::user::Model) -> Result<Booking, AppError> {
        let booking = BookingRepository::new(self.db)
            .get_with_pg(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        if booking.user_id == actor.id || actor.role == UserRole::Admin {
            return Ok(booking);
        }

        let owns_pg = PgRepository::new(self.db)
            .find_by_id(booking.pg_id)
            .await?
            .is_some_and(|pg| pg.owner_id == actor.id);
        if owns_pg {
            return Ok(booking);
        }

        Err(AuthError::AccessDenied(
            actor.id,
            format!("User cannot view booking {}", booking_id),
        )
        .into())
    }

    /// The caller's own bookings, newest first.
    pub async fn list_mine(
        &self,
        user_id: i32,
        query: BookingListQuery,
    ) -> Result<Page<Booking>, AppError> {
        let page = PageRequest::new(query.page, query.limit);

        Ok(BookingRepository::new(self.db)
            .get_paginated(BookingScope::Guest(user_id), query.status, page)
            .await?)
    }

    /// Totals across the owner's listings.
    pub async fn owner_dashboard(&self, owner_id: i32) -> Result<OwnerDashboard, AppError> {
        let scope = BookingScope::Owner(owner_id);
        let bookings = BookingRepository::new(self.db);

        Ok(OwnerDashboard {
            total_pgs: PgRepository::new(self.db).count_by_owner(owner_id).await?,
            bookings: BookingCounts::from_grouped(bookings.count_by_status(scope).await?),
            revenue: bookings.paid_revenue(scope).await?,
            recent_bookings: bookings.get_recent(scope, RECENT_BOOKINGS_LIMIT).await?,
        })
    }

    async fn find(&self, booking_id: i32) -> Result<entity::booking::Model, AppError> {
        BookingRepository::new(self.db)
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))
    }

    /// Applies a status change under the room type's lock and refreshes the cache.
    ///
    /// The booking is re-read inside the transaction and `recheck` is run against the
    /// fresh row, so a concurrent change between the caller's check and the lock is
    /// caught.
    async fn transition(
        &self,
        booking: entity::booking::Model,
        status: BookingStatus,
        reason: Option<String>,
        now: DateTime<Utc>,
        recheck: impl Fn(&entity::booking::Model) -> Result<(), BookingError>,
    ) -> Result<Booking, AppError> {
        let _guard = self.locks.acquire(booking.pg_id, booking.room_type_id).await;
        let txn = self.db.begin().await?;

        let repo = BookingRepository::new(&txn);
        let booking = repo
            .find_by_id(booking.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;
        recheck(&booking)?;

        let booking = repo.set_status(booking, status, reason, now).await?;
        refresh_room_type_cache(&txn, booking.pg_id, booking.room_type_id, now).await?;

        let pg = PgRepository::new(&txn).find_by_id(booking.pg_id).await?;
        txn.commit().await?;

        Ok(Booking::from_entity(booking, pg))
    }
}

/// Refreshes the availability cache of a room type if it still exists.
pub(crate) async fn refresh_room_type_cache<C: ConnectionTrait>(
    db: &C,
    pg_id: i32,
    room_type_id: i32,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    if let Some(room_type) = RoomTypeRepository::new(db)
        .find_in_pg(pg_id, room_type_id)
        .await?
    {
        AvailabilityService::new(db)
            .refresh_cache(&room_type, now)
            .await?;
    }
    Ok(())
}
