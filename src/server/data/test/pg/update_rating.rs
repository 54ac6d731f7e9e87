use super::*;

/// Tests storing recomputed review aggregates.
///
/// Expected: rating and review count persisted on the listing
#[tokio::test]
async fn stores_rating_and_count() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_listing_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let pg = factory::create_pg(db, owner.id).await?;

    let repo = PgRepository::new(db);
    repo.update_rating(pg.id, 4.5, 2, Utc::now()).await?;

    let pg = repo.find_by_id(pg.id).await?.unwrap();
    assert_eq!(pg.rating, 4.5);
    assert_eq!(pg.review_count, 2);

    Ok(())
}
