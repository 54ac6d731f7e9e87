use super::*;

/// Tests that the listing aggregate tracks every review.
///
/// Verifies ratings 5, 4 and 4 from three users give a mean of 4.3 over 3 reviews.
///
/// Expected: rating 4.3, review_count 3
#[tokio::test]
async fn recomputes_listing_rating() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_owner, pg, _room_type) = factory::helpers::create_listing(db).await?;
    let service = ReviewService::new(db);

    for rating in [5, 4, 4] {
        let user = factory::create_user(db).await?;
        let created = service.create(&user, review(&user, &pg, rating), Utc::now()).await?;
        assert_eq!(created.user_name.as_deref(), Some(user.name.as_str()));
    }

    let page = service.list(pg.id, PageRequest::new(None, None)).await?;
    assert_eq!(page.review_count, 3);
    assert_eq!(page.rating, 4.3);
    assert_eq!(page.reviews.total, 3);

    Ok(())
}

/// Tests the one-review-per-user rule.
///
/// Expected: BadRequest on the second review, aggregate unchanged
#[tokio::test]
async fn rejects_second_review() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_owner, pg, _room_type) = factory::helpers::create_listing(db).await?;
    let user = factory::create_user(db).await?;
    let service = ReviewService::new(db);

    service.create(&user, review(&user, &pg, 5), Utc::now()).await?;
    let result = service.create(&user, review(&user, &pg, 1), Utc::now()).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let page = service.list(pg.id, PageRequest::new(None, None)).await?;
    assert_eq!(page.review_count, 1);
    assert_eq!(page.rating, 5.0);

    Ok(())
}

/// Tests that hidden listings cannot be reviewed.
///
/// Expected: NotFound for an inactive listing
#[tokio::test]
async fn rejects_inactive_pg() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, _pg, _room_type) = factory::helpers::create_listing(db).await?;
    let hidden = factory::pg::PgFactory::new(db, owner.id)
        .active(false)
        .build()
        .await?;
    let user = factory::create_user(db).await?;

    let result = ReviewService::new(db)
        .create(&user, review(&user, &hidden, 4), Utc::now())
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
