use entity::sea_orm_active_enums::{BookingStatus, UserRole};
use serde::{Deserialize, Serialize};

use crate::model::{api::PaginationDto, booking::BookingCountsDto, user::UserDto};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCountsDto {
    pub users: u64,
    pub owners: u64,
    pub admins: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PgCountsDto {
    pub total: u64,
    pub pending: u64,
    pub approved: u64,
    pub active: u64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboardDto {
    pub users: UserCountsDto,
    pub pgs: PgCountsDto,
    pub bookings: BookingCountsDto,
    pub revenue: i64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedUsersDto {
    pub users: Vec<UserDto>,
    pub pagination: PaginationDto,
}

/// Moderation state filter for the admin listing view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationFilter {
    Pending,
    Approved,
    Rejected,
    #[default]
    All,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AdminPgQuery {
    pub status: Option<ModerationFilter>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AdminUserQuery {
    pub role: Option<UserRole>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AdminBookingQuery {
    pub status: Option<BookingStatus>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RejectPgDto {
    pub reason: String,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SetRoleDto {
    pub role: UserRole,
}
