//! Review factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Inserts a review without touching the listing's aggregate rating.
pub async fn create_review(
    db: &DatabaseConnection,
    user_id: i32,
    pg_id: i32,
    rating: i32,
) -> Result<entity::review::Model, DbErr> {
    entity::review::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        pg_id: ActiveValue::Set(pg_id),
        rating: ActiveValue::Set(rating),
        comment: ActiveValue::Set(format!("Rated {} out of 5", rating)),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
