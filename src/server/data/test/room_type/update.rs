use super::*;

/// Tests editing a room type and writing the availability cache.
///
/// Expected: new capacity and price stored; cache holds the written value
#[tokio::test]
async fn updates_fields_and_cache() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_listing_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_owner, pg, room_type) = factory::helpers::create_listing(db).await?;

    let repo = RoomTypeRepository::new(db);
    let updated = repo
        .update(
            room_type.clone(),
            3,
            &RoomTypeParams {
                id: Some(room_type.id),
                kind: RoomKind::Triple,
                price: 700,
                deposit: 1500,
                total_rooms: 6,
            },
        )
        .await?;

    assert_eq!(updated.kind, RoomKind::Triple);
    assert_eq!(updated.total_rooms, 6);
    assert_eq!(updated.position, 3);

    repo.set_available_rooms(room_type.id, 5).await?;

    let stored = repo.get_by_pg(pg.id).await?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].available_rooms, 5);
    assert_eq!(stored[0].price, 700);

    Ok(())
}
