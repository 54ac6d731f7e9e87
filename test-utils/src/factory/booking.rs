//! Booking factory.
//!
//! Inserts bookings directly, bypassing the availability check. Use it to set
//! up existing reservations; go through the booking service to test admission.

use chrono::{DateTime, Duration, DurationRound, Utc};
use entity::sea_orm_active_enums::{BookingPaymentStatus, BookingStatus};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct BookingFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    pg_id: i32,
    room_type_id: i32,
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
    guests: i32,
    total_amount: i64,
    booking_status: BookingStatus,
    payment_status: BookingPaymentStatus,
}

impl<'a> BookingFactory<'a> {
    /// Creates a factory for a pending 3-night stay starting a week from now.
    pub fn new(db: &'a DatabaseConnection, user_id: i32, pg_id: i32, room_type_id: i32) -> Self {
        let now = Utc::now()
            .duration_trunc(Duration::seconds(1))
            .unwrap_or_else(|_| Utc::now());
        let check_in = now + Duration::days(7);
        Self {
            db,
            user_id,
            pg_id,
            room_type_id,
            check_in,
            check_out: check_in + Duration::days(3),
            guests: 1,
            total_amount: 3000,
            booking_status: BookingStatus::Pending,
            payment_status: BookingPaymentStatus::Pending,
        }
    }

    pub fn check_in(mut self, check_in: DateTime<Utc>) -> Self {
        self.check_in = check_in;
        self
    }

    pub fn check_out(mut self, check_out: DateTime<Utc>) -> Self {
        self.check_out = check_out;
        self
    }

    pub fn guests(mut self, guests: i32) -> Self {
        self.guests = guests;
        self
    }

    pub fn total_amount(mut self, total_amount: i64) -> Self {
        self.total_amount = total_amount;
        self
    }

    pub fn booking_status(mut self, status: BookingStatus) -> Self {
        self.booking_status = status;
        self
    }

    pub fn payment_status(mut self, status: BookingPaymentStatus) -> Self {
        self.payment_status = status;
        self
    }

    pub async fn build(self) -> Result<entity::booking::Model, DbErr> {
        let now = Utc::now();
        entity::booking::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            pg_id: ActiveValue::Set(self.pg_id),
            room_type_id: ActiveValue::Set(self.room_type_id),
            check_in: ActiveValue::Set(self.check_in),
            check_out: ActiveValue::Set(self.check_out),
            guests: ActiveValue::Set(self.guests),
            total_amount: ActiveValue::Set(self.total_amount),
            booking_status: ActiveValue::Set(self.booking_status),
            payment_status: ActiveValue::Set(self.payment_status),
            special_requests: ActiveValue::Set(None),
            cancellation_reason: ActiveValue::Set(None),
            cancelled_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a default pending booking.
pub async fn create_booking(
    db: &DatabaseConnection,
    user_id: i32,
    pg_id: i32,
    room_type_id: i32,
) -> Result<entity::booking::Model, DbErr> {
    BookingFactory::new(db, user_id, pg_id, room_type_id)
        .build()
        .await
}
