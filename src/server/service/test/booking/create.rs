use super::*;

/// Tests the two-room overlap scenario.
///
/// Verifies that with bookings A (days 1-5) and B (days 3-7) both confirmed on a
/// two-room type, a request for days 4-6 is rejected because days 4 and 5 are held
/// by both.
///
/// Expected: A and B admitted, third request fails with RoomUnavailable
#[tokio::test]
async fn rejects_when_every_room_is_held() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = ReservationLocks::new();

    let (owner, _pg, room_type) = factory::helpers::create_listing(db).await?;
    let guest = factory::create_user(db).await?;
    let service = BookingService::new(db, &locks);

    let a = service
        .create(request(&guest, &room_type, day(1), day(5)), now())
        .await?;
    let b = service
        .create(request(&guest, &room_type, day(3), day(7)), now())
        .await?;
    for booking in [&a, &b] {
        service
            .update_status(booking.id, &owner, BookingStatus::Confirmed, None, now())
            .await?;
    }

    let result = service
        .create(request(&guest, &room_type, day(4), day(6)), now())
        .await;

    assert!(matches!(
        result,
        Err(AppError::BookingErr(BookingError::RoomUnavailable))
    ));

    Ok(())
}

/// Tests pricing and initial state of a new booking.
///
/// Expected: pending booking charged nights times the nightly rate
#[tokio::test]
async fn creates_pending_booking_with_total() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = ReservationLocks::new();

    let (_owner, _pg, room_type) = factory::helpers::create_listing(db).await?;
    let guest = factory::create_user(db).await?;

    let booking = BookingService::new(db, &locks)
        .create(request(&guest, &room_type, day(1), day(4)), now())
        .await?;

    assert_eq!(booking.booking_status, BookingStatus::Pending);
    assert_eq!(booking.nights(), 3);
    assert_eq!(booking.total_amount, 3000);
    assert!(booking.pg_name.is_some());

    Ok(())
}

/// Tests that a cancelled booking frees its room.
///
/// Expected: the window accepts a new booking once one of two holders is cancelled
#[tokio::test]
async fn cancelled_booking_releases_room() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = ReservationLocks::new();

    let (_owner, _pg, room_type) = factory::helpers::create_listing(db).await?;
    let guest = factory::create_user(db).await?;
    let service = BookingService::new(db, &locks);

    let first = service
        .create(request(&guest, &room_type, day(1), day(5)), now())
        .await?;
    service
        .create(request(&guest, &room_type, day(1), day(5)), now())
        .await?;
    assert!(service
        .create(request(&guest, &room_type, day(2), day(3)), now())
        .await
        .is_err());

    service.cancel(first.id, &guest, None, now()).await?;

    let admitted = service
        .create(request(&guest, &room_type, day(2), day(3)), now())
        .await;
    assert!(admitted.is_ok());

    Ok(())
}

/// Tests request validation ahead of any availability work.
///
/// Expected: BadRequest for a past check-in, a reversed window and too many guests
#[tokio::test]
async fn rejects_invalid_requests() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = ReservationLocks::new();

    let (_owner, _pg, room_type) = factory::helpers::create_listing(db).await?;
    let guest = factory::create_user(db).await?;
    let service = BookingService::new(db, &locks);

    let past = request(&guest, &room_type, now() - Duration::days(2), day(2));
    let reversed = request(&guest, &room_type, day(5), day(2));
    let crowded = CreateBookingParams {
        guests: 11,
        ..request(&guest, &room_type, day(1), day(2))
    };

    for params in [past, reversed, crowded] {
        let result = service.create(params, now()).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    Ok(())
}

/// Tests that unlisted PGs cannot be booked.
///
/// Expected: NotFound for an unapproved listing
#[tokio::test]
async fn rejects_unapproved_pg() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = ReservationLocks::new();

    let owner = factory::user::UserFactory::new(db)
        .role(UserRole::Owner)
        .build()
        .await?;
    let pg = factory::pg::PgFactory::new(db, owner.id)
        .approved(false)
        .build()
        .await?;
    let room_type = factory::create_room_type(db, pg.id).await?;
    let guest = factory::create_user(db).await?;

    let result = BookingService::new(db, &locks)
        .create(request(&guest, &room_type, day(1), day(2)), now())
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests the read-only availability check.
///
/// Expected: one free room of two while a single booking overlaps the window
#[tokio::test]
async fn reports_free_rooms() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = ReservationLocks::new();

    let (_owner, pg, room_type) = factory::helpers::create_listing(db).await?;
    let guest = factory::create_user(db).await?;
    let service = BookingService::new(db, &locks);
    service
        .create(request(&guest, &room_type, day(1), day(5)), now())
        .await?;

    let availability = service
        .availability(pg.id, room_type.id, day(5), day(8), now())
        .await?;

    assert_eq!(availability.free_rooms, 1);
    assert_eq!(availability.total_rooms, 2);
    assert_eq!(availability.nights, 3);
    assert_eq!(availability.total_amount, 3000);

    Ok(())
}
