//! Review data repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::{
    model::review::{CreateReviewParams, Review},
    util::pagination::{Page, PageRequest},
};

pub struct ReviewRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ReviewRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a review.
    ///
    /// # Returns
    /// - `Ok(Model)` - The created review row
    /// - `Err(DbErr)` - Database error, including a unique violation when the user
    ///   already reviewed the listing
    pub async fn create(
        &self,
        params: CreateReviewParams,
        now: DateTime<Utc>,
    ) -> Result<entity::review::Model, DbErr> {
        entity::review::ActiveModel {
            user_id: ActiveValue::Set(params.user_id),
            pg_id: ActiveValue::Set(params.pg_id),
            rating: ActiveValue::Set(params.rating),
            comment: ActiveValue::Set(params.comment),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn exists(&self, user_id: i32, pg_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Review::find()
            .filter(entity::review::Column::UserId.eq(user_id))
            .filter(entity::review::Column::PgId.eq(pg_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Every rating given to a listing.
    pub async fn ratings_for_pg(&self, pg_id: i32) -> Result<Vec<i32>, DbErr> {
        entity::prelude::Review::find()
            .filter(entity::review::Column::PgId.eq(pg_id))
            .select_only()
            .column(entity::review::Column::Rating)
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }

    /// Gets a listing's reviews, newest first, with reviewer names.
    ///
    /// # Arguments
    /// - `pg_id` - Listing id
    /// - `page` - Page number and size
    ///
    /// # Returns
    /// - `Ok(Page<Review>)` - Reviews for the requested page plus the total count
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_by_pg_paginated(
        &self,
        pg_id: i32,
        page: PageRequest,
    ) -> Result<Page<Review>, DbErr> {
        let paginator = entity::prelude::Review::find()
            .filter(entity::review::Column::PgId.eq(pg_id))
            .order_by_desc(entity::review::Column::CreatedAt)
            .order_by_desc(entity::review::Column::Id)
            .find_also_related(entity::prelude::User)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.index()).await?;
        let reviews = rows
            .into_iter()
            .map(|(review, user)| Review::from_entity(review, user))
            .collect();

        Ok(Page::new(reviews, total, page))
    }
}
