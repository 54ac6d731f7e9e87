//! In-process gateway for service tests.
//!
//! Intents get sequential ids, `confirm` reports whatever status the test configured,
//! and webhooks are verified with the real Stripe signature scheme.

use std::sync::{
    atomic::{AtomicU32, Ordering},
    Mutex,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::{PaymentGatewayKind, PaymentStatus};

use crate::server::{
    error::gateway::GatewayError,
    gateway::{
        signature, stripe, GatewayIntent, GatewayPaymentState, GatewayRefund, IntentMetadata,
        PaymentGateway, WebhookEvent,
    },
};

pub const WEBHOOK_SECRET: &str = "whsec_fake";

pub struct FakeGateway {
    counter: AtomicU32,
    confirm_status: Mutex<PaymentStatus>,
    refunds: Mutex<Vec<(String, Option<i64>)>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self {
            counter: AtomicU32::new(1),
            confirm_status: Mutex::new(PaymentStatus::Completed),
            refunds: Mutex::new(Vec::new()),
        }
    }

    /// Status the next `confirm` calls report.
    pub fn set_confirm_status(&self, status: PaymentStatus) {
        *self.confirm_status.lock().unwrap() = status;
    }

    /// `(payment_id, amount)` of every refund issued so far.
    pub fn refunds(&self) -> Vec<(String, Option<i64>)> {
        self.refunds.lock().unwrap().clone()
    }

    /// Builds a correctly signed `Stripe-Signature` header for `payload`.
    pub fn sign(payload: &[u8], now: DateTime<Utc>) -> String {
        let timestamp = now.timestamp().to_string();
        let digest = signature::sign_hex(
            WEBHOOK_SECRET,
            &[format!("{}.", timestamp).as_bytes(), payload],
        )
        .unwrap();
        format!("t={},v1={}", timestamp, digest)
    }
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    fn kind(&self) -> PaymentGatewayKind {
        PaymentGatewayKind::Stripe
    }

    fn signature_header(&self) -> &'static str {
        stripe::SIGNATURE_HEADER
    }

    async fn create_intent(
        &self,
        _amount: i64,
        _currency: &str,
        metadata: &IntentMetadata,
    ) -> Result<GatewayIntent, GatewayError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        Ok(GatewayIntent {
            id: format!("pi_fake_{}_{}", metadata.booking_id, n),
            client_secret: format!("pi_fake_{}_secret", n),
        })
    }

    async fn confirm(&self, intent_id: &str) -> Result<GatewayPaymentState, GatewayError> {
        let status = *self.confirm_status.lock().unwrap();
        Ok(GatewayPaymentState {
            status,
            payment_id: (status == PaymentStatus::Completed).then(|| intent_id.to_string()),
        })
    }

    async fn refund(
        &self,
        payment_id: &str,
        amount: Option<i64>,
    ) -> Result<GatewayRefund, GatewayError> {
        let mut refunds = self.refunds.lock().unwrap();
        refunds.push((payment_id.to_string(), amount));
        Ok(GatewayRefund {
            id: format!("re_fake_{}", refunds.len()),
            amount: amount.unwrap_or(0),
        })
    }

    fn verify_webhook(
        &self,
        signature: Option<&str>,
        payload: &[u8],
        now: DateTime<Utc>,
    ) -> Result<WebhookEvent, GatewayError> {
        let header = signature.ok_or(GatewayError::InvalidSignature)?;
        signature::verify_stripe(header, payload, WEBHOOK_SECRET, now)?;

        stripe::parse_event(payload)
    }
}
