use super::*;

/// Tests per-status counts and paid revenue for an owner.
///
/// Verifies that bookings on other owners' listings are excluded and only paid
/// bookings contribute revenue.
///
/// Expected: 1 pending, 1 confirmed and revenue 5000
#[tokio::test]
async fn counts_and_revenue_for_owner() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, pg, room_type) = factory::helpers::create_listing(db).await?;
    let guest = factory::create_user(db).await?;
    factory::booking::BookingFactory::new(db, guest.id, pg.id, room_type.id)
        .total_amount(2000)
        .build()
        .await?;
    factory::booking::BookingFactory::new(db, guest.id, pg.id, room_type.id)
        .booking_status(BookingStatus::Confirmed)
        .payment_status(BookingPaymentStatus::Paid)
        .total_amount(5000)
        .build()
        .await?;

    let (_other_guest, _other_pg, _other_room, _other_booking) =
        factory::helpers::create_booking_with_dependencies(db).await?;

    let repo = BookingRepository::new(db);
    let mut counts = repo.count_by_status(BookingScope::Owner(owner.id)).await?;
    counts.sort_by_key(|(status, _)| *status as u8);

    assert_eq!(
        counts,
        vec![(BookingStatus::Pending, 1), (BookingStatus::Confirmed, 1)]
    );
    assert_eq!(repo.paid_revenue(BookingScope::Owner(owner.id)).await?, 5000);
    assert_eq!(repo.paid_revenue(BookingScope::All).await?, 5000);

    Ok(())
}

/// Tests revenue when nothing is paid.
///
/// Expected: 0 rather than an error for an empty sum
#[tokio::test]
async fn revenue_is_zero_without_paid_bookings() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::helpers::create_booking_with_dependencies(db).await?;

    let revenue = BookingRepository::new(db)
        .paid_revenue(BookingScope::All)
        .await?;

    assert_eq!(revenue, 0);

    Ok(())
}
