use super::*;

/// Tests opening an intent for a pending booking.
///
/// Expected: created payment for the booking's full amount with a client secret
#[tokio::test]
async fn opens_intent_for_full_amount() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = ReservationLocks::new();
    let gateway = FakeGateway::new();

    let (guest, _pg, _room_type, booking) =
        factory::helpers::create_booking_with_dependencies(db).await?;

    let intent = PaymentService::new(db, &gateway, &locks, CURRENCY)
        .create_intent(&guest, booking.id, Utc::now())
        .await?;

    assert_eq!(intent.payment.status, PaymentStatus::Created);
    assert_eq!(intent.payment.amount, booking.total_amount);
    assert_eq!(intent.payment.currency, CURRENCY);
    assert!(!intent.client_secret.is_empty());

    Ok(())
}

/// Tests that only the guest can pay for their booking.
///
/// Expected: AccessDenied for another user
#[tokio::test]
async fn rejects_other_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = ReservationLocks::new();
    let gateway = FakeGateway::new();

    let (_guest, _pg, _room_type, booking) =
        factory::helpers::create_booking_with_dependencies(db).await?;
    let stranger = factory::create_user(db).await?;

    let result = PaymentService::new(db, &gateway, &locks, CURRENCY)
        .create_intent(&stranger, booking.id, Utc::now())
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests that paid or non-pending bookings cannot be paid again.
///
/// Expected: BadRequest for a paid booking and for a cancelled one
#[tokio::test]
async fn rejects_unpayable_booking() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = ReservationLocks::new();
    let gateway = FakeGateway::new();

    let (_owner, pg, room_type) = factory::helpers::create_listing(db).await?;
    let guest = factory::create_user(db).await?;
    let paid = factory::booking::BookingFactory::new(db, guest.id, pg.id, room_type.id)
        .payment_status(BookingPaymentStatus::Paid)
        .build()
        .await?;
    let cancelled = factory::booking::BookingFactory::new(db, guest.id, pg.id, room_type.id)
        .booking_status(BookingStatus::Cancelled)
        .build()
        .await?;
    let service = PaymentService::new(db, &gateway, &locks, CURRENCY);

    for booking in [paid, cancelled] {
        let result = service.create_intent(&guest, booking.id, Utc::now()).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    Ok(())
}
