use super::*;

/// Sets up a booking paid through the fake gateway and returns it with its guest.
async fn paid_booking(
    db: &DatabaseConnection,
    gateway: &FakeGateway,
    locks: &ReservationLocks,
) -> Result<(entity::user::Model, entity::booking::Model), AppError> {
    let (guest, _pg, _room_type, created) =
        factory::helpers::create_booking_with_dependencies(db).await?;
    let service = PaymentService::new(db, gateway, locks, CURRENCY);
    let intent = service
        .create_intent(&guest, created.id, Utc::now())
        .await?;
    service
        .confirm(&guest, &intent.payment.intent_id, Utc::now())
        .await?;

    Ok((guest, created))
}

/// Tests a full refund by an admin.
///
/// Expected: payment and booking refunded, gateway called with the full amount
#[tokio::test]
async fn admin_refunds_full_amount() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = ReservationLocks::new();
    let gateway = FakeGateway::new();

    let (_guest, created) = paid_booking(db, &gateway, &locks).await?;
    let admin = factory::user::create_admin(db).await?;

    let payment = PaymentService::new(db, &gateway, &locks, CURRENCY)
        .refund(&admin, created.id, None, Utc::now())
        .await?;

    assert_eq!(payment.status, PaymentStatus::Refunded);
    assert_eq!(payment.refunded_amount, Some(created.total_amount));
    assert_eq!(gateway.refunds().len(), 1);
    assert_eq!(gateway.refunds()[0].1, Some(created.total_amount));
    assert_eq!(
        booking(db, created.id).await.payment_status,
        BookingPaymentStatus::Refunded
    );

    Ok(())
}

/// Tests refund authorization and amount bounds.
///
/// Expected: AccessDenied for the guest, BadRequest above the paid amount, no gateway call
#[tokio::test]
async fn rejects_guest_and_excess_amount() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = ReservationLocks::new();
    let gateway = FakeGateway::new();

    let (guest, created) = paid_booking(db, &gateway, &locks).await?;
    let admin = factory::user::create_admin(db).await?;
    let service = PaymentService::new(db, &gateway, &locks, CURRENCY);

    let by_guest = service.refund(&guest, created.id, None, Utc::now()).await;
    assert!(matches!(
        by_guest,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    let excess = service
        .refund(&admin, created.id, Some(created.total_amount + 1), Utc::now())
        .await;
    assert!(matches!(excess, Err(AppError::BadRequest(_))));

    assert!(gateway.refunds().is_empty());

    Ok(())
}

/// Tests that unpaid bookings cannot be refunded.
///
/// Expected: BadRequest
#[tokio::test]
async fn rejects_unpaid_booking() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = ReservationLocks::new();
    let gateway = FakeGateway::new();

    let (_guest, _pg, _room_type, created) =
        factory::helpers::create_booking_with_dependencies(db).await?;
    let admin = factory::user::create_admin(db).await?;

    let result = PaymentService::new(db, &gateway, &locks, CURRENCY)
        .refund(&admin, created.id, Some(100), Utc::now())
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}
