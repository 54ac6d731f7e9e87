use super::*;

/// Tests the 24 hour notice boundary.
///
/// Verifies that a guest can cancel exactly 24 hours before check-in but not one
/// minute later.
///
/// Expected: CancellationWindowClosed at 23h59m, Ok at 24h
#[tokio::test]
async fn enforces_notice_window() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = ReservationLocks::new();

    let (_owner, pg, room_type) = factory::helpers::create_listing(db).await?;
    let guest = factory::create_user(db).await?;
    let booking = factory::booking::BookingFactory::new(db, guest.id, pg.id, room_type.id)
        .check_in(day(10))
        .check_out(day(12))
        .build()
        .await?;
    let service = BookingService::new(db, &locks);

    let late = day(10) - Duration::hours(23) - Duration::minutes(59);
    let result = service.cancel(booking.id, &guest, None, late).await;
    assert!(matches!(
        result,
        Err(AppError::BookingErr(BookingError::CancellationWindowClosed))
    ));

    let cancelled = service
        .cancel(
            booking.id,
            &guest,
            Some("  change of plans ".to_string()),
            day(10) - Duration::hours(24),
        )
        .await?;
    assert_eq!(cancelled.booking_status, BookingStatus::Cancelled);
    assert_eq!(cancelled.cancellation_reason.as_deref(), Some("change of plans"));
    assert!(cancelled.cancelled_at.is_some());

    Ok(())
}

/// Tests that only the guest or an admin can cancel.
///
/// Expected: AccessDenied for another guest, Ok for an admin
#[tokio::test]
async fn only_guest_or_admin_can_cancel() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = ReservationLocks::new();

    let (_guest, _pg, _room_type, booking) =
        factory::helpers::create_booking_with_dependencies(db).await?;
    let stranger = factory::create_user(db).await?;
    let admin = factory::user::create_admin(db).await?;
    let service = BookingService::new(db, &locks);

    let result = service
        .cancel(booking.id, &stranger, None, Utc::now())
        .await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    let cancelled = service.cancel(booking.id, &admin, None, Utc::now()).await?;
    assert_eq!(cancelled.booking_status, BookingStatus::Cancelled);

    Ok(())
}

/// Tests that finished bookings stay finished.
///
/// Expected: NotCancellable for a completed booking
#[tokio::test]
async fn rejects_completed_booking() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = ReservationLocks::new();

    let (_owner, pg, room_type) = factory::helpers::create_listing(db).await?;
    let guest = factory::create_user(db).await?;
    let booking = factory::booking::BookingFactory::new(db, guest.id, pg.id, room_type.id)
        .booking_status(BookingStatus::Completed)
        .build()
        .await?;

    let result = BookingService::new(db, &locks)
        .cancel(booking.id, &guest, None, Utc::now())
        .await;

    assert!(matches!(
        result,
        Err(AppError::BookingErr(BookingError::NotCancellable(
            BookingStatus::Completed
        )))
    ));

    Ok(())
}
