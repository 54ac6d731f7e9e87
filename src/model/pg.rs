use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::{GenderPreference, RoomKind};
use serde::{Deserialize, Serialize};

use crate::model::api::PaginationDto;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomTypeDto {
    pub id: i32,
    #[serde(rename = "type")]
    pub kind: RoomKind,
    pub price: i64,
    pub deposit: i64,
    pub total_rooms: i32,
    pub available_rooms: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PgDto {
    pub id: i32,
    pub owner_id: i32,
    pub name: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub gender_preference: GenderPreference,
    pub amenities: Vec<String>,
    pub room_types: Vec<RoomTypeDto>,
    pub is_approved: bool,
    pub is_active: bool,
    pub rejection_reason: Option<String>,
    pub rating: f64,
    pub review_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedPgsDto {
    pub pgs: Vec<PgDto>,
    pub pagination: PaginationDto,
}

/// Room type entry in a create or update request.
///
/// On update, entries carrying an `id` edit that room type in place; entries
/// without one are added.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RoomTypeInputDto {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(rename = "type")]
    pub kind: RoomKind,
    pub price: i64,
    #[serde(default)]
    pub deposit: i64,
    pub total_rooms: i32,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreatePgDto {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub pincode: String,
    #[serde(default)]
    pub gender_preference: Option<GenderPreference>,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub room_types: Vec<RoomTypeInputDto>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdatePgDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub pincode: Option<String>,
    #[serde(default)]
    pub gender_preference: Option<GenderPreference>,
    #[serde(default)]
    pub amenities: Option<Vec<String>>,
    #[serde(default)]
    pub room_types: Option<Vec<RoomTypeInputDto>>,
}

/// Query string accepted by `GET /api/pgs`.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PgSearchQuery {
    pub city: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub room_type: Option<RoomKind>,
    /// Comma separated; a listing must offer all of them.
    pub amenities: Option<String>,
    pub gender: Option<GenderPreference>,
    pub search: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub sort: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AvailabilityQuery {
    pub room_type_id: i32,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityDto {
    pub available: bool,
    pub free_rooms: i64,
    pub total_rooms: i32,
    pub nights: i64,
    pub total_amount: i64,
}
