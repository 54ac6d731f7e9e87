use super::*;

/// Tests recording a refund and its effect on revenue.
///
/// Expected: refunded payment no longer counted as completed revenue
#[tokio::test]
async fn refund_removes_payment_from_revenue() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (guest, _pg, _room_type, booking) =
        factory::helpers::create_booking_with_dependencies(db).await?;
    let payment = factory::payment::PaymentFactory::new(db, booking.id, guest.id)
        .status(PaymentStatus::Completed)
        .amount(3000)
        .build()
        .await?;

    let repo = PaymentRepository::new(db);
    assert_eq!(repo.completed_revenue().await?, 3000);

    let payment = repo
        .record_refund(payment, "re_1".to_string(), 3000, Utc::now())
        .await?;

    assert_eq!(payment.status, PaymentStatus::Refunded);
    assert_eq!(payment.refund_id.as_deref(), Some("re_1"));
    assert_eq!(payment.refunded_amount, Some(3000));
    assert_eq!(repo.completed_revenue().await?, 0);

    Ok(())
}
