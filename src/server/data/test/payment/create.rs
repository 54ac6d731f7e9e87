use super::*;

/// Tests creating a payment and finding it by gateway intent id.
///
/// Expected: payment starts in `created` and is found by its intent id
#[tokio::test]
async fn creates_and_finds_by_intent() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (guest, _pg, _room_type, booking) =
        factory::helpers::create_booking_with_dependencies(db).await?;

    let repo = PaymentRepository::new(db);
    let payment = repo
        .create(
            CreatePaymentParams {
                booking_id: booking.id,
                user_id: guest.id,
                gateway: PaymentGatewayKind::Razorpay,
                intent_id: "order_123".to_string(),
                amount: booking.total_amount,
                currency: "inr".to_string(),
            },
            Utc::now(),
        )
        .await?;

    assert_eq!(payment.status, PaymentStatus::Created);

    let found = repo.find_by_intent_id("order_123").await?;
    assert_eq!(found.map(|p| p.id), Some(payment.id));
    assert!(repo.find_by_intent_id("order_999").await?.is_none());

    Ok(())
}

/// Tests that completing a payment keeps the gateway payment id.
///
/// Expected: completed with the gateway id stored
#[tokio::test]
async fn completion_stores_gateway_payment_id() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (guest, _pg, _room_type, booking) =
        factory::helpers::create_booking_with_dependencies(db).await?;
    let payment = factory::create_payment(db, booking.id, guest.id).await?;

    let repo = PaymentRepository::new(db);
    let payment = repo
        .set_status(
            payment,
            PaymentStatus::Completed,
            Some("pay_42".to_string()),
            Utc::now(),
        )
        .await?;

    assert_eq!(payment.status, PaymentStatus::Completed);
    assert_eq!(payment.gateway_payment_id.as_deref(), Some("pay_42"));
    assert_eq!(
        repo.find_completed_for_booking(booking.id)
            .await?
            .map(|p| p.id),
        Some(payment.id)
    );

    Ok(())
}
