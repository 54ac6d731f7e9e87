use super::*;

/// Tests that a room type is only found through its own listing.
///
/// Expected: Some for the owning listing, None for another listing
#[tokio::test]
async fn scoped_to_owning_listing() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_listing_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, pg, room_type) = factory::helpers::create_listing(db).await?;
    let other_pg = factory::create_pg(db, owner.id).await?;

    let repo = RoomTypeRepository::new(db);

    assert!(repo.find_in_pg(pg.id, room_type.id).await?.is_some());
    assert!(repo.find_in_pg(other_pg.id, room_type.id).await?.is_none());

    Ok(())
}
