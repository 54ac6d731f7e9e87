//! Razorpay Orders adapter.
//!
//! An order plays the role of an intent: its id is stored as the payment's intent id
//! and the captured payment's id is what refunds are issued against.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::{PaymentGatewayKind, PaymentStatus};
use serde::Deserialize;
use serde_json::json;

use crate::server::{
    error::gateway::GatewayError,
    gateway::{
        ensure_success, from_minor_units, signature, to_minor_units, GatewayIntent,
        GatewayPaymentState, GatewayRefund, IntentMetadata, PaymentGateway, WebhookEvent,
    },
};

pub const SIGNATURE_HEADER: &str = "X-Razorpay-Signature";

#[derive(Debug, Deserialize)]
struct OrderResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct PaymentEntity {
    id: String,
    #[serde(default)]
    order_id: Option<String>,
    status: String,
}

#[derive(Debug, Deserialize)]
struct PaymentList {
    items: Vec<PaymentEntity>,
}

#[derive(Debug, Deserialize)]
struct RefundResponse {
    id: String,
    amount: i64,
}

#[derive(Debug, Deserialize)]
struct EventEnvelope {
    event: String,
    #[serde(default)]
    payload: EventPayload,
}

#[derive(Debug, Default, Deserialize)]
struct EventPayload {
    payment: Option<Wrapped<PaymentEntity>>,
    order: Option<Wrapped<OrderResponse>>,
}

#[derive(Debug, Deserialize)]
struct Wrapped<T> {
    entity: T,
}

pub struct RazorpayGateway {
    http_client: reqwest::Client,
    key_id: String,
    key_secret: String,
    webhook_secret: String,
    api_base: String,
}

impl RazorpayGateway {
    pub fn new(
        http_client: reqwest::Client,
        key_id: String,
        key_secret: String,
        webhook_secret: String,
        api_base: String,
    ) -> Self {
        Self {
            http_client,
            key_id,
            key_secret,
            webhook_secret,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }
}

/// Collapses the payments made against an order into one state.
///
/// Any captured payment completes the order. Otherwise the order failed only if every
/// attempt failed.
fn order_state(payments: &[PaymentEntity]) -> GatewayPaymentState {
    if let Some(captured) = payments.iter().find(|p| p.status == "captured") {
        return GatewayPaymentState {
            status: PaymentStatus::Completed,
            payment_id: Some(captured.id.clone()),
        };
    }

    let status = if !payments.is_empty() && payments.iter().all(|p| p.status == "failed") {
        PaymentStatus::Failed
    } else {
        PaymentStatus::Created
    };

    GatewayPaymentState {
        status,
        payment_id: None,
    }
}

/// Parses a verified Razorpay event body.
fn parse_event(payload: &[u8]) -> Result<WebhookEvent, GatewayError> {
    let event: EventEnvelope = serde_json::from_slice(payload)
        .map_err(|e| GatewayError::MalformedPayload(e.to_string()))?;

    let payment = event.payload.payment.map(|p| p.entity);
    let order_id = event
        .payload
        .order
        .map(|o| o.entity.id)
        .or_else(|| payment.as_ref().and_then(|p| p.order_id.clone()));

    let kind = event.event;
    let missing =
        |what: &str| GatewayError::MalformedPayload(format!("{} without {}", kind, what));

    Ok(match kind.as_str() {
        "payment.captured" | "order.paid" => WebhookEvent::PaymentSucceeded {
            intent_id: order_id.ok_or_else(|| missing("order id"))?,
            payment_id: payment.map(|p| p.id).ok_or_else(|| missing("payment"))?,
        },
        "payment.failed" => WebhookEvent::PaymentFailed {
            intent_id: order_id.ok_or_else(|| missing("order id"))?,
        },
        _ => WebhookEvent::Ignored(kind.clone()),
    })
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    fn kind(&self) -> PaymentGatewayKind {
        PaymentGatewayKind::Razorpay
    }

    fn signature_header(&self) -> &'static str {
        SIGNATURE_HEADER
    }

    /// Creates an order. Razorpay's checkout needs the public key id next to the
    /// order id, so that is what is returned as the client secret.
    async fn create_intent(
        &self,
        amount: i64,
        currency: &str,
        metadata: &IntentMetadata,
    ) -> Result<GatewayIntent, GatewayError> {
        let body = json!({
            "amount": to_minor_units(amount)?,
            "currency": currency.to_uppercase(),
            "receipt": format!("booking_{}", metadata.booking_id),
            "notes": {
                "booking_id": metadata.booking_id.to_string(),
                "user_id": metadata.user_id.to_string(),
            },
        });

        let response = self
            .http_client
            .post(format!("{}/v1/orders", self.api_base))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&body)
            .send()
            .await?;

        let order = ensure_success(response)
            .await?
            .json::<OrderResponse>()
            .await?;

        Ok(GatewayIntent {
            id: order.id,
            client_secret: self.key_id.clone(),
        })
    }

    async fn confirm(&self, intent_id: &str) -> Result<GatewayPaymentState, GatewayError> {
        let response = self
            .http_client
            .get(format!("{}/v1/orders/{}/payments", self.api_base, intent_id))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .send()
            .await?;

        let payments = ensure_success(response)
            .await?
            .json::<PaymentList>()
            .await?;

        Ok(order_state(&payments.items))
    }

    async fn refund(
        &self,
        payment_id: &str,
        amount: Option<i64>,
    ) -> Result<GatewayRefund, GatewayError> {
        let body = match amount {
            Some(amount) => json!({ "amount": to_minor_units(amount)? }),
            None => json!({}),
        };

        let response = self
            .http_client
            .post(format!("{}/v1/payments/{}/refund", self.api_base, payment_id))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&body)
            .send()
            .await?;

        let refund = ensure_success(response)
            .await?
            .json::<RefundResponse>()
            .await?;

        Ok(GatewayRefund {
            id: refund.id,
            amount: from_minor_units(refund.amount),
        })
    }

    fn verify_webhook(
        &self,
        signature: Option<&str>,
        payload: &[u8],
        _now: DateTime<Utc>,
    ) -> Result<WebhookEvent, GatewayError> {
        let signature = signature.ok_or(GatewayError::InvalidSignature)?;
        signature::verify_razorpay(signature, payload, &self.webhook_secret)?;

        parse_event(payload)
    }
}
