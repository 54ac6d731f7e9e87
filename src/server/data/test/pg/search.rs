use super::*;

/// Tests that search only returns approved, active listings.
///
/// Expected: only the approved active listing is returned
#[tokio::test]
async fn excludes_unapproved_and_inactive() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_listing_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let listed = factory::create_pg(db, owner.id).await?;
    factory::pg::PgFactory::new(db, owner.id)
        .approved(false)
        .build()
        .await?;
    factory::pg::PgFactory::new(db, owner.id)
        .active(false)
        .build()
        .await?;

    let page = PgRepository::new(db)
        .search(&SearchPgParams::default())
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, listed.id);

    Ok(())
}

/// Tests the city filter.
///
/// Verifies that city matching ignores case but is not a substring match.
///
/// Expected: only the Pune listing
#[tokio::test]
async fn filters_city_case_insensitively() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_listing_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let pune = factory::pg::PgFactory::new(db, owner.id)
        .city("Pune")
        .build()
        .await?;
    factory::pg::PgFactory::new(db, owner.id)
        .city("Pune Cantonment")
        .build()
        .await?;

    let page = PgRepository::new(db)
        .search(&SearchPgParams {
            city: Some("pune".to_string()),
            ..Default::default()
        })
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, pune.id);

    Ok(())
}

/// Tests price and room kind filters against room types.
///
/// Verifies that a listing matches only when a single room type satisfies both the
/// price range and the kind.
///
/// Expected: only the listing with a single room at 900
#[tokio::test]
async fn filters_by_room_price_and_kind() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_listing_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let cheap_single = factory::create_pg(db, owner.id).await?;
    factory::room_type::RoomTypeFactory::new(db, cheap_single.id)
        .kind(RoomKind::Single)
        .price(900)
        .build()
        .await?;

    let mixed = factory::create_pg(db, owner.id).await?;
    factory::room_type::RoomTypeFactory::new(db, mixed.id)
        .kind(RoomKind::Single)
        .price(2000)
        .build()
        .await?;
    factory::room_type::RoomTypeFactory::new(db, mixed.id)
        .kind(RoomKind::Dormitory)
        .price(500)
        .build()
        .await?;

    let page = PgRepository::new(db)
        .search(&SearchPgParams {
            min_price: Some(400),
            max_price: Some(1000),
            room_type: Some(RoomKind::Single),
            ..Default::default()
        })
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, cheap_single.id);

    Ok(())
}

/// Tests that every requested amenity must be present.
///
/// Expected: only the listing with both wifi and ac
#[tokio::test]
async fn requires_all_amenities() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_listing_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let both = factory::create_pg(db, owner.id).await?;
    factory::pg::create_amenity(db, both.id, "wifi").await?;
    factory::pg::create_amenity(db, both.id, "ac").await?;
    let wifi_only = factory::create_pg(db, owner.id).await?;
    factory::pg::create_amenity(db, wifi_only.id, "wifi").await?;

    let page = PgRepository::new(db)
        .search(&SearchPgParams {
            amenities: vec!["wifi".to_string(), "ac".to_string()],
            ..Default::default()
        })
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, both.id);
    assert_eq!(page.items[0].amenities, vec!["wifi", "ac"]);

    Ok(())
}

/// Tests free-text search over several columns.
///
/// Expected: the listing whose description mentions the term
#[tokio::test]
async fn searches_description_text() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_listing_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let lakeside = factory::pg::PgFactory::new(db, owner.id)
        .description("Quiet rooms by the lake")
        .build()
        .await?;
    factory::create_pg(db, owner.id).await?;

    let page = PgRepository::new(db)
        .search(&SearchPgParams {
            search: Some("lake".to_string()),
            ..Default::default()
        })
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, lakeside.id);

    Ok(())
}

/// Tests sorting by name ascending with pagination.
///
/// Expected: page 2 of size 1 holds the second name alphabetically
#[tokio::test]
async fn sorts_and_paginates() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_listing_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    for name in ["Charlie", "Alpha", "Bravo"] {
        factory::pg::PgFactory::new(db, owner.id)
            .name(name)
            .build()
            .await?;
    }

    let page = PgRepository::new(db)
        .search(&SearchPgParams {
            sort: PgSort {
                field: SortField::Name,
                descending: false,
            },
            page: PageRequest::new(Some(2), Some(1)),
            ..Default::default()
        })
        .await?;

    assert_eq!(page.total, 3);
    assert_eq!(page.total_pages(), 3);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].name, "Bravo");

    Ok(())
}
