use super::*;

/// Tests confirming a succeeded payment.
///
/// Verifies that the payment completes, the booking becomes confirmed and paid, and a
/// second confirm changes nothing.
///
/// Expected: completed payment, confirmed and paid booking
#[tokio::test]
async fn completes_payment_and_confirms_booking() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = ReservationLocks::new();
    let gateway = FakeGateway::new();

    let (guest, _pg, _room_type, created) =
        factory::helpers::create_booking_with_dependencies(db).await?;
    let service = PaymentService::new(db, &gateway, &locks, CURRENCY);

    let intent = service
        .create_intent(&guest, created.id, Utc::now())
        .await?;
    let payment = service
        .confirm(&guest, &intent.payment.intent_id, Utc::now())
        .await?;

    assert_eq!(payment.status, PaymentStatus::Completed);
    assert_eq!(
        payment.gateway_payment_id.as_deref(),
        Some(intent.payment.intent_id.as_str())
    );

    let updated = booking(db, created.id).await;
    assert_eq!(updated.booking_status, BookingStatus::Confirmed);
    assert_eq!(updated.payment_status, BookingPaymentStatus::Paid);

    let again = service
        .confirm(&guest, &intent.payment.intent_id, Utc::now())
        .await?;
    assert_eq!(again.status, PaymentStatus::Completed);

    Ok(())
}

/// Tests a declined payment and the retry that follows.
///
/// Expected: booking stays pending with payment failed, a new intent can be opened
#[tokio::test]
async fn failed_payment_allows_retry() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = ReservationLocks::new();
    let gateway = FakeGateway::new();
    gateway.set_confirm_status(PaymentStatus::Failed);

    let (guest, _pg, _room_type, created) =
        factory::helpers::create_booking_with_dependencies(db).await?;
    let service = PaymentService::new(db, &gateway, &locks, CURRENCY);

    let intent = service
        .create_intent(&guest, created.id, Utc::now())
        .await?;
    let payment = service
        .confirm(&guest, &intent.payment.intent_id, Utc::now())
        .await?;
    assert_eq!(payment.status, PaymentStatus::Failed);

    let updated = booking(db, created.id).await;
    assert_eq!(updated.booking_status, BookingStatus::Pending);
    assert_eq!(updated.payment_status, BookingPaymentStatus::Failed);

    let retry = service
        .create_intent(&guest, created.id, Utc::now())
        .await?;
    assert_ne!(retry.payment.intent_id, intent.payment.intent_id);

    Ok(())
}

/// Tests that an unpaid intent leaves everything as it was.
///
/// Expected: payment still created, booking payment still pending
#[tokio::test]
async fn unpaid_intent_is_unchanged() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = ReservationLocks::new();
    let gateway = FakeGateway::new();
    gateway.set_confirm_status(PaymentStatus::Created);

    let (guest, _pg, _room_type, created) =
        factory::helpers::create_booking_with_dependencies(db).await?;
    let service = PaymentService::new(db, &gateway, &locks, CURRENCY);

    let intent = service
        .create_intent(&guest, created.id, Utc::now())
        .await?;
    let payment = service
        .confirm(&guest, &intent.payment.intent_id, Utc::now())
        .await?;

    assert_eq!(payment.status, PaymentStatus::Created);
    assert_eq!(
        booking(db, created.id).await.payment_status,
        BookingPaymentStatus::Pending
    );

    Ok(())
}
