//! Payment lifecycle: intents, confirmation, refunds and gateway webhooks.
//!
//! A payment row follows `created → completed → refunded` or `created → failed`.
//! Completion confirms a pending booking and marks it paid; failure marks the booking's
//! payment failed and leaves it pending so the guest can retry with a new intent.
//! Reapplying a status the payment already has is a no-op, which makes webhook
//! redelivery harmless.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::{BookingPaymentStatus, BookingStatus, PaymentStatus, UserRole};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        booking::BookingRepository,
        payment::{CreatePaymentParams, PaymentRepository},
    },
    error::{auth::AuthError, AppError},
    gateway::{IntentMetadata, PaymentGateway, WebhookEvent},
    model::payment::{check_transition, Payment, PaymentIntent, Transition},
    service::lock::ReservationLocks,
};

pub struct PaymentService<'a> {
    db: &'a DatabaseConnection,
    gateway: &'a dyn PaymentGateway,
    locks: &'a ReservationLocks,
    currency: &'a str,
}

impl<'a> PaymentService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        gateway: &'a dyn PaymentGateway,
        locks: &'a ReservationLocks,
        currency: &'a str,
    ) -> Self {
        Self {
            db,
            gateway,
            locks,
            currency,
        }
    }

    /// Opens a gateway intent for the full amount of the caller's pending booking.
    ///
    /// # Returns
    /// - `Ok(PaymentIntent)` - Stored payment plus the checkout secret
    /// - `Err(AppError::NotFound)` - No such booking
    /// - `Err(AppError::AuthErr(AccessDenied))` - Booking belongs to someone else
    /// - `Err(AppError::BadRequest)` - Booking not pending or already paid
    /// - `Err(AppError::GatewayErr)` - Gateway call failed
    pub async fn create_intent(
        &self,
        actor: &entity::user::Model,
        booking_id: i32,
        now: DateTime<Utc>,
    ) -> Result<PaymentIntent, AppError> {
        let booking = BookingRepository::new(self.db)
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        if booking.user_id != actor.id {
            return Err(AuthError::AccessDenied(
                actor.id,
                format!("User cannot pay for booking {}", booking_id),
            )
            .into());
        }

        if booking.booking_status != BookingStatus::Pending {
            return Err(AppError::BadRequest(
                "Only pending bookings can be paid".to_string(),
            ));
        }

        if !matches!(
            booking.payment_status,
            BookingPaymentStatus::Pending | BookingPaymentStatus::Failed
        ) {
            return Err(AppError::BadRequest(
                "Booking has already been paid".to_string(),
            ));
        }

        let intent = self
            .gateway
            .create_intent(
                booking.total_amount,
                self.currency,
                &IntentMetadata {
                    booking_id: booking.id,
                    user_id: actor.id,
                },
            )
            .await?;

        let payment = PaymentRepository::new(self.db)
            .create(
                CreatePaymentParams {
                    booking_id: booking.id,
                    user_id: actor.id,
                    gateway: self.gateway.kind(),
                    intent_id: intent.id,
                    amount: booking.total_amount,
                    currency: self.currency.to_string(),
                },
                now,
            )
            .await?;

        tracing::info!(
            "Payment {} ({}) opened for booking {}",
            payment.id,
            payment.intent_id,
            booking.id
        );

        Ok(PaymentIntent {
            payment: Payment::from_entity(payment),
            client_secret: intent.client_secret,
        })
    }

    /// Asks the gateway for the intent's state and applies it.
    pub async fn confirm(
        &self,
        actor: &entity::user::Model,
        intent_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Payment, AppError> {
        let payment = PaymentRepository::new(self.db)
            .find_by_intent_id(intent_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Payment not found".to_string()))?;

        if payment.user_id != actor.id {
            return Err(AuthError::AccessDenied(
                actor.id,
                format!("User cannot confirm payment {}", payment.id),
            )
            .into());
        }

        let state = self.gateway.confirm(intent_id).await?;
        if state.status == PaymentStatus::Created {
            return Ok(Payment::from_entity(payment));
        }

        self.apply(intent_id, state.status, state.payment_id, now)
            .await
    }

    /// Refunds a paid booking, fully or partially. Admin only.
    ///
    /// # Arguments
    /// - `actor` - Admin issuing the refund
    /// - `booking_id` - Paid booking
    /// - `amount` - Whole currency units, defaults to the full paid amount
    /// - `now` - Update timestamp
    ///
    /// # Returns
    /// - `Ok(Payment)` - The payment in `refunded` state
    /// - `Err(AppError::BadRequest)` - Booking not paid or amount out of range
    pub async fn refund(
        &self,
        actor: &entity::user::Model,
        booking_id: i32,
        amount: Option<i64>,
        now: DateTime<Utc>,
    ) -> Result<Payment, AppError> {
        if actor.role != UserRole::Admin {
            return Err(AuthError::AccessDenied(
                actor.id,
                "Only admins can issue refunds".to_string(),
            )
            .into());
        }

        let booking = BookingRepository::new(self.db)
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        if booking.payment_status != BookingPaymentStatus::Paid {
            return Err(AppError::BadRequest(
                "Booking has not been paid".to_string(),
            ));
        }

        let payment = PaymentRepository::new(self.db)
            .find_completed_for_booking(booking.id)
            .await?
            .ok_or_else(|| AppError::BadRequest("No completed payment for booking".to_string()))?;

        let amount = amount.unwrap_or(payment.amount);
        if amount < 1 || amount > payment.amount {
            return Err(AppError::BadRequest(format!(
                "Refund amount must be between 1 and {}",
                payment.amount
            )));
        }

        let gateway_payment_id = payment
            .gateway_payment_id
            .clone()
            .unwrap_or_else(|| payment.intent_id.clone());

        let refund = self
            .gateway
            .refund(&gateway_payment_id, Some(amount))
            .await?;

        let _guard = self.locks.acquire(booking.pg_id, booking.room_type_id).await;
        let txn = self.db.begin().await?;

        let payment = PaymentRepository::new(&txn)
            .record_refund(payment, refund.id, refund.amount, now)
            .await?;
        let bookings = BookingRepository::new(&txn);
        if let Some(booking) = bookings.find_by_id(booking.id).await? {
            bookings
                .set_payment_status(booking, BookingPaymentStatus::Refunded, None, now)
                .await?;
        }

        txn.commit().await?;

        tracing::info!(
            "Refunded {} of payment {} for booking {} by admin {}",
            refund.amount,
            payment.id,
            booking_id,
            actor.id
        );

        Ok(Payment::from_entity(payment))
    }

    /// Handles a gateway webhook delivery.
    ///
    /// The signature is verified before the body is parsed; a delivery that fails
    /// verification changes nothing. Events for unknown intents are acknowledged and
    /// logged.
    pub async fn webhook(
        &self,
        signature: Option<&str>,
        payload: &[u8],
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let event = self.gateway.verify_webhook(signature, payload, now)?;

        let (intent_id, status, payment_id) = match event {
            WebhookEvent::PaymentSucceeded {
                intent_id,
                payment_id,
            } => (intent_id, PaymentStatus::Completed, Some(payment_id)),
            WebhookEvent::PaymentFailed { intent_id } => (intent_id, PaymentStatus::Failed, None),
            WebhookEvent::Ignored(kind) => {
                tracing::debug!("Ignoring webhook event {}", kind);
                return Ok(());
            }
        };

        if PaymentRepository::new(self.db)
            .find_by_intent_id(&intent_id)
            .await?
            .is_none()
        {
            tracing::warn!("Webhook for unknown intent {}", intent_id);
            return Ok(());
        }

        self.apply(&intent_id, status, payment_id, now).await?;

        Ok(())
    }

    /// Moves a payment to `status` and mirrors the result onto its booking.
    ///
    /// Runs under the booking's room type lock so it cannot interleave with a
    /// cancellation. Stale reports, such as a failure arriving after completion, are
    /// logged and leave the payment unchanged.
    async fn apply(
        &self,
        intent_id: &str,
        status: PaymentStatus,
        gateway_payment_id: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Payment, AppError> {
        let booking = {
            let payment = PaymentRepository::new(self.db)
                .find_by_intent_id(intent_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Payment not found".to_string()))?;
            BookingRepository::new(self.db)
                .find_by_id(payment.booking_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?
        };

        let _guard = self.locks.acquire(booking.pg_id, booking.room_type_id).await;
        let txn = self.db.begin().await?;

        let payments = PaymentRepository::new(&txn);
        let payment = payments
            .find_by_intent_id(intent_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Payment not found".to_string()))?;

        match check_transition(payment.status, status) {
            Ok(Transition::Apply) => {}
            Ok(Transition::AlreadyApplied) => {
                tracing::debug!("Payment {} already {:?}", payment.id, status);
                return Ok(Payment::from_entity(payment));
            }
            Err(_) => {
                tracing::warn!(
                    "Ignoring stale {:?} for payment {} in {:?}",
                    status,
                    payment.id,
                    payment.status
                );
                return Ok(Payment::from_entity(payment));
            }
        }

        let payment = payments
            .set_status(payment, status, gateway_payment_id, now)
            .await?;

        let bookings = BookingRepository::new(&txn);
        if let Some(booking) = bookings.find_by_id(payment.booking_id).await? {
            let (payment_status, booking_status) = match status {
                PaymentStatus::Completed => (
                    BookingPaymentStatus::Paid,
                    (booking.booking_status == BookingStatus::Pending)
                        .then_some(BookingStatus::Confirmed),
                ),
                _ => (BookingPaymentStatus::Failed, None),
            };
            bookings
                .set_payment_status(booking, payment_status, booking_status, now)
                .await?;
        }

        txn.commit().await?;

        tracing::info!(
            "Payment {} for booking {} is now {:?}",
            payment.id,
            payment.booking_id,
            payment.status
        );

        Ok(Payment::from_entity(payment))
    }
}
