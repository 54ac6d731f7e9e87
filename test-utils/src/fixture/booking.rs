//! Booking fixtures for creating in-memory test data.

use chrono::{DateTime, Duration, TimeZone, Utc};
use entity::{
    booking,
    sea_orm_active_enums::{BookingPaymentStatus, BookingStatus},
};

/// Default check-in instant used by booking fixtures.
pub fn default_check_in() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
}

/// Creates a pending 3-night booking on listing `1`, room type `1`, for user `1`.
pub fn entity() -> booking::Model {
    entity_builder().build()
}

/// Creates a booking entity builder for customization.
pub fn entity_builder() -> BookingEntityBuilder {
    let check_in = default_check_in();
    BookingEntityBuilder {
        id: 1,
        user_id: 1,
        check_in,
        check_out: check_in + Duration::days(3),
        booking_status: BookingStatus::Pending,
        payment_status: BookingPaymentStatus::Pending,
    }
}

pub struct BookingEntityBuilder {
    id: i32,
    user_id: i32,
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
    booking_status: BookingStatus,
    payment_status: BookingPaymentStatus,
}

impl BookingEntityBuilder {
    pub fn id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    pub fn user_id(mut self, user_id: i32) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn check_in(mut self, check_in: DateTime<Utc>) -> Self {
        self.check_in = check_in;
        self
    }

    pub fn check_out(mut self, check_out: DateTime<Utc>) -> Self {
        self.check_out = check_out;
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

    pub fn build(self) -> booking::Model {
        let created = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        booking::Model {
            id: self.id,
            user_id: self.user_id,
            pg_id: 1,
            room_type_id: 1,
            check_in: self.check_in,
            check_out: self.check_out,
            guests: 1,
            total_amount: 3000,
            booking_status: self.booking_status,
            payment_status: self.payment_status,
            special_requests: None,
            cancellation_reason: None,
            cancelled_at: None,
            created_at: created,
            updated_at: created,
        }
    }
}
