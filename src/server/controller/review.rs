use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use crate::{
    model::review::{CreateReviewDto, ReviewListQuery},
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::review::CreateReviewParams,
        service::review::ReviewService,
        state::AppState,
        util::pagination::PageRequest,
    },
};

/// Reviews of a listing, newest first, with the listing's aggregate rating.
pub async fn get_reviews(
    State(state): State<AppState>,
    Path(pg_id): Path<i32>,
    Query(query): Query<ReviewListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = ReviewService::new(&state.db)
        .list(pg_id, PageRequest::new(query.page, query.limit))
        .await?;

    Ok((StatusCode::OK, Json(page.into_dto())))
}

/// Review a listing. One review per user and listing.
///
/// # Access Control
/// - Any authenticated, active user
///
/// # Returns
/// - `201 Created` - The review; the listing's rating is recomputed
/// - `400 Bad Request` - Rating outside 1 to 5, empty comment or already reviewed
/// - `404 Not Found` - Unknown or unlisted PG
pub async fn create_review(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(pg_id): Path<i32>,
    Json(payload): Json<CreateReviewDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let params = CreateReviewParams::from_dto(user.id, pg_id, payload)?;
    let review = ReviewService::new(&state.db)
        .create(&user, params, Utc::now())
        .await?;

    Ok((StatusCode::CREATED, Json(review.into_dto())))
}
