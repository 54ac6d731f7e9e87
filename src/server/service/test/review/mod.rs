use crate::server::{
    error::AppError,
    model::review::CreateReviewParams,
    service::review::ReviewService,
    util::pagination::PageRequest,
};
use chrono::Utc;
use test_utils::{builder::TestBuilder, factory};

mod create;

fn review(user: &entity::user::Model, pg: &entity::pg::Model, rating: i32) -> CreateReviewParams {
    CreateReviewParams {
        user_id: user.id,
        pg_id: pg.id,
        rating,
        comment: "Clean rooms and friendly staff".to_string(),
    }
}
