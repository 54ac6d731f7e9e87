//! Payment data repository.
//!
//! Payment rows mirror a gateway intent or order. The gateway's identifier is unique
//! and is how webhook deliveries find their payment.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::{PaymentGatewayKind, PaymentStatus};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect,
};

/// Insert parameters for a freshly created gateway intent.
#[derive(Debug, Clone)]
pub struct CreatePaymentParams {
    pub booking_id: i32,
    pub user_id: i32,
    pub gateway: PaymentGatewayKind,
    pub intent_id: String,
    pub amount: i64,
    pub currency: String,
}

pub struct PaymentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PaymentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        params: CreatePaymentParams,
        now: DateTime<Utc>,
    ) -> Result<entity::payment::Model, DbErr> {
        entity::payment::ActiveModel {
            booking_id: ActiveValue::Set(params.booking_id),
            user_id: ActiveValue::Set(params.user_id),
            gateway: ActiveValue::Set(params.gateway),
            intent_id: ActiveValue::Set(params.intent_id),
            gateway_payment_id: ActiveValue::Set(None),
            amount: ActiveValue::Set(params.amount),
            currency: ActiveValue::Set(params.currency),
            status: ActiveValue::Set(PaymentStatus::Created),
            refund_id: ActiveValue::Set(None),
            refunded_amount: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_intent_id(
        &self,
        intent_id: &str,
    ) -> Result<Option<entity::payment::Model>, DbErr> {
        entity::prelude::Payment::find()
            .filter(entity::payment::Column::IntentId.eq(intent_id))
            .one(self.db)
            .await
    }

    /// The most recent completed payment for a booking, the one a refund applies to.
    pub async fn find_completed_for_booking(
        &self,
        booking_id: i32,
    ) -> Result<Option<entity::payment::Model>, DbErr> {
        entity::prelude::Payment::find()
            .filter(entity::payment::Column::BookingId.eq(booking_id))
            .filter(entity::payment::Column::Status.eq(PaymentStatus::Completed))
            .order_by_desc(entity::payment::Column::Id)
            .one(self.db)
            .await
    }

    /// Moves a payment to a new status, keeping any previously stored gateway payment id
    /// when `gateway_payment_id` is `None`.
    pub async fn set_status(
        &self,
        payment: entity::payment::Model,
        status: PaymentStatus,
        gateway_payment_id: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<entity::payment::Model, DbErr> {
        let mut active = payment.into_active_model();
        active.status = ActiveValue::Set(status);
        if let Some(payment_id) = gateway_payment_id {
            active.gateway_payment_id = ActiveValue::Set(Some(payment_id));
        }
        active.updated_at = ActiveValue::Set(now);
        active.update(self.db).await
    }

    pub async fn record_refund(
        &self,
        payment: entity::payment::Model,
        refund_id: String,
        amount: i64,
        now: DateTime<Utc>,
    ) -> Result<entity::payment::Model, DbErr> {
        let mut active = payment.into_active_model();
        active.status = ActiveValue::Set(PaymentStatus::Refunded);
        active.refund_id = ActiveValue::Set(Some(refund_id));
        active.refunded_amount = ActiveValue::Set(Some(amount));
        active.updated_at = ActiveValue::Set(now);
        active.update(self.db).await
    }

    /// Sum of completed payment amounts across the platform.
    pub async fn completed_revenue(&self) -> Result<i64, DbErr> {
        let revenue = entity::prelude::Payment::find()
            .filter(entity::payment::Column::Status.eq(PaymentStatus::Completed))
            .select_only()
            .column_as(entity::payment::Column::Amount.sum(), "revenue")
            .into_tuple::<Option<i64>>()
            .one(self.db)
            .await?;

        Ok(revenue.flatten().unwrap_or(0))
    }
}
