//! Payment domain model and state machine.

use entity::sea_orm_active_enums::{PaymentGatewayKind, PaymentStatus};

use crate::{
    model::payment::{PaymentDto, PaymentIntentDto},
    server::error::AppError,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: i32,
    pub booking_id: i32,
    pub user_id: i32,
    pub gateway: PaymentGatewayKind,
    pub intent_id: String,
    pub gateway_payment_id: Option<String>,
    pub amount: i64,
    pub currency: String,
    pub status: PaymentStatus,
    pub refund_id: Option<String>,
    pub refunded_amount: Option<i64>,
}

impl Payment {
    pub fn from_entity(entity: entity::payment::Model) -> Self {
        Self {
            id: entity.id,
            booking_id: entity.booking_id,
            user_id: entity.user_id,
            gateway: entity.gateway,
            intent_id: entity.intent_id,
            gateway_payment_id: entity.gateway_payment_id,
            amount: entity.amount,
            currency: entity.currency,
            status: entity.status,
            refund_id: entity.refund_id,
            refunded_amount: entity.refunded_amount,
        }
    }

    pub fn into_dto(self) -> PaymentDto {
        PaymentDto {
            id: self.id,
            booking_id: self.booking_id,
            gateway: self.gateway,
            intent_id: self.intent_id,
            gateway_payment_id: self.gateway_payment_id,
            amount: self.amount,
            currency: self.currency,
            status: self.status,
            refund_id: self.refund_id,
            refunded_amount: self.refunded_amount,
        }
    }
}

/// A stored payment together with what the client needs to open the gateway checkout.
#[derive(Debug, Clone)]
pub struct PaymentIntent {
    pub payment: Payment,
    pub client_secret: String,
}

impl PaymentIntent {
    pub fn into_dto(self) -> PaymentIntentDto {
        PaymentIntentDto {
            payment_id: self.payment.id,
            gateway: self.payment.gateway,
            intent_id: self.payment.intent_id,
            client_secret: self.client_secret,
            amount: self.payment.amount,
            currency: self.payment.currency,
        }
    }
}

/// Outcome of checking a requested payment status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The payment moves to the new status.
    Apply,
    /// The payment is already in the requested status; nothing to do.
    AlreadyApplied,
}

/// created → completed | failed, completed → refunded.
///
/// Gateways redeliver webhooks, so asking for the current status again is
/// reported as [`Transition::AlreadyApplied`] rather than an error.
pub fn check_transition(from: PaymentStatus, to: PaymentStatus) -> Result<Transition, AppError> {
    use PaymentStatus::*;

    if from == to {
        return Ok(Transition::AlreadyApplied);
    }

    match (from, to) {
        (Created, Completed) | (Created, Failed) | (Completed, Refunded) => Ok(Transition::Apply),
        (from, to) => Err(AppError::BadRequest(format!(
            "Payment cannot move from {:?} to {:?}",
            from, to
        ))),
    }
}
