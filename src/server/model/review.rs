use chrono::{DateTime, Utc};

use crate::{
    model::review::{CreateReviewDto, PaginatedReviewsDto, ReviewDto},
    server::{error::AppError, util::pagination::Page},
};

const MAX_COMMENT_LENGTH: usize = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: i32,
    pub user_id: i32,
    pub user_name: Option<String>,
    pub pg_id: i32,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn from_entity(entity: entity::review::Model, user: Option<entity::user::Model>) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            user_name: user.map(|u| u.name),
            pg_id: entity.pg_id,
            rating: entity.rating,
            comment: entity.comment,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> ReviewDto {
        ReviewDto {
            id: self.id,
            user_id: self.user_id,
            user_name: self.user_name,
            pg_id: self.pg_id,
            rating: self.rating,
            comment: self.comment,
            created_at: self.created_at,
        }
    }
}

/// A page of reviews together with the listing's aggregate rating.
#[derive(Debug, Clone)]
pub struct ReviewPage {
    pub reviews: Page<Review>,
    pub rating: f64,
    pub review_count: i32,
}

impl ReviewPage {
    pub fn into_dto(self) -> PaginatedReviewsDto {
        let pagination = self.reviews.pagination_dto();
        PaginatedReviewsDto {
            reviews: self
                .reviews
                .items
                .into_iter()
                .map(Review::into_dto)
                .collect(),
            rating: self.rating,
            review_count: self.review_count,
            pagination,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateReviewParams {
    pub user_id: i32,
    pub pg_id: i32,
    pub rating: i32,
    pub comment: String,
}

impl CreateReviewParams {
    /// Validates rating range `1..=5` and a non-empty comment of at most 1000 characters.
    pub fn from_dto(user_id: i32, pg_id: i32, dto: CreateReviewDto) -> Result<Self, AppError> {
        if !(1..=5).contains(&dto.rating) {
            return Err(AppError::BadRequest(
                "Rating must be between 1 and 5".to_string(),
            ));
        }

        let comment = dto.comment.trim().to_string();
        if comment.is_empty() {
            return Err(AppError::BadRequest("Comment is required".to_string()));
        }
        if comment.chars().count() > MAX_COMMENT_LENGTH {
            return Err(AppError::BadRequest(format!(
                "Comment cannot exceed {} characters",
                MAX_COMMENT_LENGTH
            )));
        }

        Ok(Self {
            user_id,
            pg_id,
            rating: dto.rating,
            comment,
        })
    }
}

/// Mean of `ratings` rounded to one decimal place, `0.0` when there are none.
pub fn average_rating(ratings: &[i32]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: i64 = ratings.iter().map(|r| *r as i64).sum();
    let mean = sum as f64 / ratings.len() as f64;
    (mean * 10.0).round() / 10.0
}
