use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::api::PaginationDto;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    pub id: i32,
    pub user_id: i32,
    pub user_name: Option<String>,
    pub pg_id: i32,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedReviewsDto {
    pub reviews: Vec<ReviewDto>,
    pub rating: f64,
    pub review_count: i32,
    pub pagination: PaginationDto,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateReviewDto {
    pub rating: i32,
    pub comment: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReviewListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}
