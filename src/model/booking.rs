use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::{BookingPaymentStatus, BookingStatus};
use serde::{Deserialize, Serialize};

use crate::model::api::PaginationDto;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    pub id: i32,
    pub user_id: i32,
    pub pg_id: i32,
    pub pg_name: Option<String>,
    pub room_type_id: i32,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub nights: i64,
    pub guests: i32,
    pub total_amount: i64,
    pub booking_status: BookingStatus,
    pub payment_status: BookingPaymentStatus,
    pub special_requests: Option<String>,
    pub cancellation_reason: Option<String>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedBookingsDto {
    pub bookings: Vec<BookingDto>,
    pub pagination: PaginationDto,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateBookingDto {
    pub pg_id: i32,
    pub room_type_id: i32,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub guests: i32,
    #[serde(default)]
    pub special_requests: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CancelBookingDto {
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateBookingStatusDto {
    pub status: BookingStatus,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BookingListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<BookingStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCountsDto {
    pub pending: u64,
    pub confirmed: u64,
    pub cancelled: u64,
    pub completed: u64,
    pub total: u64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerDashboardDto {
    pub total_pgs: u64,
    pub bookings: BookingCountsDto,
    pub revenue: i64,
    pub recent_bookings: Vec<BookingDto>,
}
