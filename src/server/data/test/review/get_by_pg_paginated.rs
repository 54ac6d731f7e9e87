use super::*;

/// Tests listing reviews with reviewer names.
///
/// Expected: 1 review on the page with the reviewer's name, total 2
#[tokio::test]
async fn attaches_reviewer_names() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_owner, pg, _room_type) = factory::helpers::create_listing(db).await?;
    let first = factory::user::UserFactory::new(db)
        .name("Meera")
        .build()
        .await?;
    let second = factory::user::UserFactory::new(db)
        .name("Meera")
        .build()
        .await?;
    factory::create_review(db, first.id, pg.id, 3).await?;
    factory::create_review(db, second.id, pg.id, 5).await?;

    let page = ReviewRepository::new(db)
        .get_by_pg_paginated(pg.id, PageRequest::new(Some(1), Some(1)))
        .await?;

    assert_eq!(page.total, 2);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].user_name.as_deref(), Some("Meera"));

    Ok(())
}

/// Tests requesting a page far past the end of the results.
///
/// Expected: empty page with the real total, no offset overflow
#[tokio::test]
async fn oversized_page_is_empty() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_owner, pg, _room_type) = factory::helpers::create_listing(db).await?;
    let reviewer = factory::create_user(db).await?;
    factory::create_review(db, reviewer.id, pg.id, 4).await?;

    let page = ReviewRepository::new(db)
        .get_by_pg_paginated(pg.id, PageRequest::new(Some(u64::MAX), None))
        .await?;

    assert_eq!(page.total, 1);
    assert!(page.items.is_empty());

    Ok(())
}
