use super::*;

/// Tests creating a review and detecting it afterwards.
///
/// Verifies that `exists` is scoped to the reviewer and the listing.
///
/// Expected: true for the reviewer, false for another user
#[tokio::test]
async fn creates_review_and_reports_existence() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_owner, pg, _room_type) = factory::helpers::create_listing(db).await?;
    let guest = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;

    let repo = ReviewRepository::new(db);
    let review = repo
        .create(
            CreateReviewParams {
                user_id: guest.id,
                pg_id: pg.id,
                rating: 4,
                comment: "Clean rooms".to_string(),
            },
            Utc::now(),
        )
        .await?;

    assert_eq!(review.rating, 4);
    assert!(repo.exists(guest.id, pg.id).await?);
    assert!(!repo.exists(other.id, pg.id).await?);

    Ok(())
}

/// Tests reading back every rating for aggregation.
///
/// Expected: both ratings returned
#[tokio::test]
async fn lists_ratings_for_listing() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_owner, pg, _room_type) = factory::helpers::create_listing(db).await?;
    let first = factory::create_user(db).await?;
    let second = factory::create_user(db).await?;
    factory::create_review(db, first.id, pg.id, 4).await?;
    factory::create_review(db, second.id, pg.id, 5).await?;

    let mut ratings = ReviewRepository::new(db).ratings_for_pg(pg.id).await?;
    ratings.sort();

    assert_eq!(ratings, vec![4, 5]);

    Ok(())
}
