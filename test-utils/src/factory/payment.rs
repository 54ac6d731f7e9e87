//! Payment factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use entity::sea_orm_active_enums::{PaymentGatewayKind, PaymentStatus};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct PaymentFactory<'a> {
    db: &'a DatabaseConnection,
    booking_id: i32,
    user_id: i32,
    gateway: PaymentGatewayKind,
    intent_id: String,
    gateway_payment_id: Option<String>,
    amount: i64,
    status: PaymentStatus,
}

impl<'a> PaymentFactory<'a> {
    /// Defaults to a created Stripe intent for 3000 INR.
    pub fn new(db: &'a DatabaseConnection, booking_id: i32, user_id: i32) -> Self {
        Self {
            db,
            booking_id,
            user_id,
            gateway: PaymentGatewayKind::Stripe,
            intent_id: format!("pi_test_{}", next_id()),
            gateway_payment_id: None,
            amount: 3000,
            status: PaymentStatus::Created,
        }
    }

    pub fn gateway(mut self, gateway: PaymentGatewayKind) -> Self {
        self.gateway = gateway;
        self
    }

    pub fn intent_id(mut self, intent_id: impl Into<String>) -> Self {
        self.intent_id = intent_id.into();
        self
    }

    pub fn gateway_payment_id(mut self, payment_id: impl Into<String>) -> Self {
        self.gateway_payment_id = Some(payment_id.into());
        self
    }

    pub fn amount(mut self, amount: i64) -> Self {
        self.amount = amount;
        self
    }

    pub fn status(mut self, status: PaymentStatus) -> Self {
        self.status = status;
        self
    }

    pub async fn build(self) -> Result<entity::payment::Model, DbErr> {
        let now = Utc::now();
        entity::payment::ActiveModel {
            booking_id: ActiveValue::Set(self.booking_id),
            user_id: ActiveValue::Set(self.user_id),
            gateway: ActiveValue::Set(self.gateway),
            intent_id: ActiveValue::Set(self.intent_id),
            gateway_payment_id: ActiveValue::Set(self.gateway_payment_id),
            amount: ActiveValue::Set(self.amount),
            currency: ActiveValue::Set("inr".to_string()),
            status: ActiveValue::Set(self.status),
            refund_id: ActiveValue::Set(None),
            refunded_amount: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a default payment record for a booking.
pub async fn create_payment(
    db: &DatabaseConnection,
    booking_id: i32,
    user_id: i32,
) -> Result<entity::payment::Model, DbErr> {
    PaymentFactory::new(db, booking_id, user_id).build().await
}
