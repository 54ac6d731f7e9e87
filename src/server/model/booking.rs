//! Booking domain models, parameters and lifecycle rules.
//!
//! A booking holds one room of a room type for `[check_in, check_out]`. The rules
//! here are pure so they can be exercised without a database: stay validation,
//! the 24 hour cancellation window and the status state machine.

use chrono::{DateTime, Duration, Utc};
use entity::sea_orm_active_enums::{BookingPaymentStatus, BookingStatus};

use crate::{
    model::{
        booking::{BookingCountsDto, BookingDto, CreateBookingDto, OwnerDashboardDto},
        pg::AvailabilityDto,
    },
    server::{
        error::{booking::BookingError, AppError},
        util::time::{nights_between, truncate_to_seconds},
    },
};

pub const MIN_GUESTS: i32 = 1;
pub const MAX_GUESTS: i32 = 10;

/// Minimum notice, in hours, a guest must give to cancel their own booking.
pub const CANCELLATION_NOTICE_HOURS: i64 = 24;

const MAX_SPECIAL_REQUESTS_LENGTH: usize = 500;

#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: i32,
    pub user_id: i32,
    pub pg_id: i32,
    pub pg_name: Option<String>,
    pub room_type_id: i32,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub guests: i32,
    pub total_amount: i64,
    pub booking_status: BookingStatus,
    pub payment_status: BookingPaymentStatus,
    pub special_requests: Option<String>,
    pub cancellation_reason: Option<String>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Converts a booking row, optionally joined with its listing, to a domain model.
    pub fn from_entity(entity: entity::booking::Model, pg: Option<entity::pg::Model>) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            pg_id: entity.pg_id,
            pg_name: pg.map(|pg| pg.name),
            room_type_id: entity.room_type_id,
            check_in: entity.check_in,
            check_out: entity.check_out,
            guests: entity.guests,
            total_amount: entity.total_amount,
            booking_status: entity.booking_status,
            payment_status: entity.payment_status,
            special_requests: entity.special_requests,
            cancellation_reason: entity.cancellation_reason,
            cancelled_at: entity.cancelled_at,
            created_at: entity.created_at,
        }
    }

    pub fn nights(&self) -> i64 {
        nights_between(self.check_in, self.check_out)
    }

    pub fn into_dto(self) -> BookingDto {
        let nights = self.nights();
        BookingDto {
            id: self.id,
            user_id: self.user_id,
            pg_id: self.pg_id,
            pg_name: self.pg_name,
            room_type_id: self.room_type_id,
            check_in: self.check_in,
            check_out: self.check_out,
            nights,
            guests: self.guests,
            total_amount: self.total_amount,
            booking_status: self.booking_status,
            payment_status: self.payment_status,
            special_requests: self.special_requests,
            cancellation_reason: self.cancellation_reason,
            cancelled_at: self.cancelled_at,
            created_at: self.created_at,
        }
    }
}

/// Reservation request. Instants are truncated to whole seconds on the way in.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateBookingParams {
    pub user_id: i32,
    pub pg_id: i32,
    pub room_type_id: i32,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub guests: i32,
    pub special_requests: Option<String>,
}

impl CreateBookingParams {
    pub fn from_dto(user_id: i32, dto: CreateBookingDto) -> Self {
        Self {
            user_id,
            pg_id: dto.pg_id,
            room_type_id: dto.room_type_id,
            check_in: truncate_to_seconds(dto.check_in),
            check_out: truncate_to_seconds(dto.check_out),
            guests: dto.guests,
            special_requests: dto
                .special_requests
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }

    /// Checks dates, guest count and note length against `now`, returning the
    /// number of nights to charge.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<i64, AppError> {
        let nights = validate_window(self.check_in, self.check_out, now)?;

        if !(MIN_GUESTS..=MAX_GUESTS).contains(&self.guests) {
            return Err(AppError::BadRequest(format!(
                "Guests must be between {} and {}",
                MIN_GUESTS, MAX_GUESTS
            )));
        }
        if let Some(notes) = &self.special_requests {
            if notes.chars().count() > MAX_SPECIAL_REQUESTS_LENGTH {
                return Err(AppError::BadRequest(format!(
                    "Special requests cannot exceed {} characters",
                    MAX_SPECIAL_REQUESTS_LENGTH
                )));
            }
        }

        Ok(nights)
    }
}

/// Validates a stay window and returns its length in nights.
///
/// Check-in is compared by calendar date so a same-day check-in later than the
/// current time of day is accepted.
pub fn validate_window(
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<i64, AppError> {
    if check_in.date_naive() < now.date_naive() {
        return Err(AppError::BadRequest(
            "Check-in date cannot be in the past".to_string(),
        ));
    }
    if check_out <= check_in {
        return Err(AppError::BadRequest(
            "Check-out must be after check-in".to_string(),
        ));
    }

    let nights = nights_between(check_in, check_out);
    if nights <= 0 {
        return Err(AppError::BadRequest(
            "Stay must be at least one night".to_string(),
        ));
    }

    Ok(nights)
}

/// Price of a stay: nightly rate times nights.
pub fn total_amount(price: i64, nights: i64) -> Result<i64, AppError> {
    price
        .checked_mul(nights)
        .ok_or_else(|| AppError::BadRequest("Stay is too long".to_string()))
}

/// Whether a booking in `status` still holds its room.
pub fn is_active(status: BookingStatus) -> bool {
    BookingStatus::ACTIVE.contains(&status)
}

/// Guest-initiated cancellation: only pending or confirmed bookings, and only
/// while at least 24 hours remain before check-in.
pub fn ensure_cancellable(
    booking: &entity::booking::Model,
    now: DateTime<Utc>,
) -> Result<(), BookingError> {
    if !is_active(booking.booking_status) {
        return Err(BookingError::NotCancellable(booking.booking_status));
    }
    if booking.check_in - now < Duration::hours(CANCELLATION_NOTICE_HOURS) {
        return Err(BookingError::CancellationWindowClosed);
    }
    Ok(())
}

/// Owner or admin driven status changes.
///
/// pending → confirmed → completed, and either active state → cancelled.
/// Completed and cancelled bookings never change again.
pub fn ensure_transition(from: BookingStatus, to: BookingStatus) -> Result<(), BookingError> {
    use BookingStatus::*;

    match (from, to) {
        (Pending, Confirmed) | (Confirmed, Completed) | (Pending, Cancelled)
        | (Confirmed, Cancelled) => Ok(()),
        (from, to) => Err(BookingError::InvalidTransition { from, to }),
    }
}

/// Result of a read-only availability check for one room type and window.
#[derive(Debug, Clone, PartialEq)]
pub struct Availability {
    pub free_rooms: i64,
    pub total_rooms: i32,
    pub nights: i64,
    pub total_amount: i64,
}

impl Availability {
    pub fn into_dto(self) -> AvailabilityDto {
        AvailabilityDto {
            available: self.free_rooms > 0,
            free_rooms: self.free_rooms,
            total_rooms: self.total_rooms,
            nights: self.nights,
            total_amount: self.total_amount,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingCounts {
    pub pending: u64,
    pub confirmed: u64,
    pub cancelled: u64,
    pub completed: u64,
}

impl BookingCounts {
    pub fn from_grouped(rows: Vec<(BookingStatus, i64)>) -> Self {
        let mut counts = Self::default();
        for (status, count) in rows {
            let count = count.max(0) as u64;
            match status {
                BookingStatus::Pending => counts.pending += count,
                BookingStatus::Confirmed => counts.confirmed += count,
                BookingStatus::Cancelled => counts.cancelled += count,
                BookingStatus::Completed => counts.completed += count,
            }
        }
        counts
    }

    pub fn total(&self) -> u64 {
        self.pending + self.confirmed + self.cancelled + self.completed
    }

    pub fn into_dto(self) -> BookingCountsDto {
        BookingCountsDto {
            total: self.total(),
            pending: self.pending,
            confirmed: self.confirmed,
            cancelled: self.cancelled,
            completed: self.completed,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OwnerDashboard {
    pub total_pgs: u64,
    pub bookings: BookingCounts,
    pub revenue: i64,
    pub recent_bookings: Vec<Booking>,
}

impl OwnerDashboard {
    pub fn into_dto(self) -> OwnerDashboardDto {
        OwnerDashboardDto {
            total_pgs: self.total_pgs,
            bookings: self.bookings.into_dto(),
            revenue: self.revenue,
            recent_bookings: self
                .recent_bookings
                .into_iter()
                .map(Booking::into_dto)
                .collect(),
        }
    }
}
