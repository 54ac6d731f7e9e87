use super::*;

/// Tests the inclusive overlap rule.
///
/// Verifies that a stay starting exactly when an existing stay ends is counted as
/// overlapping, while a stay starting a second later is not.
///
/// Expected: 1 for the touching window, 0 for the disjoint one
#[tokio::test]
async fn touching_ranges_overlap() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_owner, pg, room_type) = factory::helpers::create_listing(db).await?;
    let guest = factory::create_user(db).await?;
    factory::booking::BookingFactory::new(db, guest.id, pg.id, room_type.id)
        .check_in(day(1))
        .check_out(day(5))
        .build()
        .await?;

    let repo = BookingRepository::new(db);

    let touching = repo
        .count_overlapping(pg.id, room_type.id, day(5), day(7))
        .await?;
    assert_eq!(touching, 1);

    let disjoint = repo
        .count_overlapping(pg.id, room_type.id, day(5) + Duration::seconds(1), day(7))
        .await?;
    assert_eq!(disjoint, 0);

    Ok(())
}

/// Tests that only pending and confirmed bookings hold rooms.
///
/// Expected: cancelled and completed bookings are ignored
#[tokio::test]
async fn ignores_inactive_bookings() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_owner, pg, room_type) = factory::helpers::create_listing(db).await?;
    let guest = factory::create_user(db).await?;
    for status in [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Cancelled,
        BookingStatus::Completed,
    ] {
        factory::booking::BookingFactory::new(db, guest.id, pg.id, room_type.id)
            .check_in(day(1))
            .check_out(day(5))
            .booking_status(status)
            .build()
            .await?;
    }

    let count = BookingRepository::new(db)
        .count_overlapping(pg.id, room_type.id, day(2), day(3))
        .await?;

    assert_eq!(count, 2);

    Ok(())
}

/// Tests that bookings of another room type are not counted.
///
/// Expected: 0 for the second room type
#[tokio::test]
async fn scoped_to_room_type() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_owner, pg, room_type) = factory::helpers::create_listing(db).await?;
    let other = factory::create_room_type(db, pg.id).await?;
    let guest = factory::create_user(db).await?;
    factory::booking::BookingFactory::new(db, guest.id, pg.id, room_type.id)
        .check_in(day(1))
        .check_out(day(5))
        .build()
        .await?;

    let count = BookingRepository::new(db)
        .count_overlapping(pg.id, other.id, day(1), day(5))
        .await?;

    assert_eq!(count, 0);

    Ok(())
}
