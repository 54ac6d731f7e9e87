use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{pg::PgRepository, review::ReviewRepository},
    error::AppError,
    model::review::{average_rating, CreateReviewParams, Review, ReviewPage},
    util::pagination::PageRequest,
};

const DUPLICATE_REVIEW: &str = "You have already reviewed this PG";

pub struct ReviewService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReviewService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a review and recomputes the listing's rating and review count.
    ///
    /// The aggregate is rebuilt from every stored rating inside the same transaction
    /// as the insert. A second review by the same user is rejected up front, and the
    /// unique index catches a concurrent duplicate.
    ///
    /// # Arguments
    /// - `actor` - Reviewer
    /// - `params` - Validated rating and comment
    /// - `now` - Creation timestamp
    ///
    /// # Returns
    /// - `Ok(Review)` - The stored review
    /// - `Err(AppError::NotFound)` - Listing is not publicly listed
    /// - `Err(AppError::BadRequest)` - The user already reviewed this listing
    pub async fn create(
        &self,
        actor: &entity::user::Model,
        params: CreateReviewParams,
        now: DateTime<Utc>,
    ) -> Result<Review, AppError> {
        let pg_id = params.pg_id;
        PgRepository::new(self.db)
            .find_by_id(pg_id)
            .await?
            .filter(|pg| pg.is_approved && pg.is_active)
            .ok_or_else(|| AppError::NotFound("PG not found".to_string()))?;

        if ReviewRepository::new(self.db)
            .exists(params.user_id, pg_id)
            .await?
        {
            return Err(AppError::BadRequest(DUPLICATE_REVIEW.to_string()));
        }

        let txn = self.db.begin().await?;
        let reviews = ReviewRepository::new(&txn);
        let review = reviews
            .create(params, now)
            .await
            .map_err(|e| AppError::on_unique_violation(e, DUPLICATE_REVIEW))?;

        let ratings = reviews.ratings_for_pg(pg_id).await?;
        PgRepository::new(&txn)
            .update_rating(pg_id, average_rating(&ratings), ratings.len() as i32, now)
            .await?;
        txn.commit().await?;

        tracing::info!("User {} reviewed PG {}", actor.id, pg_id);

        Ok(Review::from_entity(review, Some(actor.clone())))
    }

    /// Public, paginated reviews of a listing with its aggregate rating.
    pub async fn list(&self, pg_id: i32, page: PageRequest) -> Result<ReviewPage, AppError> {
        let pg = PgRepository::new(self.db)
            .find_by_id(pg_id)
            .await?
            .ok_or_else(|| AppError::NotFound("PG not found".to_string()))?;

        let reviews = ReviewRepository::new(self.db)
            .get_by_pg_paginated(pg_id, page)
            .await?;

        Ok(ReviewPage {
            reviews,
            rating: pg.rating,
            review_count: pg.review_count,
        })
    }
}
