use super::*;

/// Tests rejecting and then approving a listing.
///
/// Verifies the rejection reason is stored and shows under the rejected filter, and
/// that a later approval clears it.
///
/// Expected: rejected with reason, then approved without one
#[tokio::test]
async fn reject_then_approve() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::UserFactory::new(db)
        .role(UserRole::Owner)
        .build()
        .await?;
    let pg = factory::pg::PgFactory::new(db, owner.id)
        .approved(false)
        .build()
        .await?;
    let service = AdminService::new(db);

    let rejected = service
        .reject(pg.id, "  Photos missing ", Utc::now())
        .await?;
    assert!(!rejected.is_approved);
    assert_eq!(rejected.rejection_reason.as_deref(), Some("Photos missing"));

    let listed = service
        .pgs(ModerationFilter::Rejected, PageRequest::new(None, None))
        .await?;
    assert_eq!(listed.total, 1);

    let approved = service.approve(pg.id, Utc::now()).await?;
    assert!(approved.is_approved);
    assert!(approved.rejection_reason.is_none());

    Ok(())
}

/// Tests the rejection reason bounds.
///
/// Expected: BadRequest for a blank reason and for one over 500 characters
#[tokio::test]
async fn rejects_invalid_reason() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_owner, pg, _room_type) = factory::helpers::create_listing(db).await?;
    let service = AdminService::new(db);

    for reason in ["   ".to_string(), "x".repeat(501)] {
        let result = service.reject(pg.id, &reason, Utc::now()).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    Ok(())
}

/// Tests moderating a listing that does not exist.
///
/// Expected: NotFound
#[tokio::test]
async fn unknown_pg_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = AdminService::new(db).approve(404, Utc::now()).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
