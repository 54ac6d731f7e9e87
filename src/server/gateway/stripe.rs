//! Stripe PaymentIntents adapter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::{PaymentGatewayKind, PaymentStatus};
use serde::Deserialize;

use crate::server::{
    error::gateway::GatewayError,
    gateway::{
        ensure_success, from_minor_units, signature, to_minor_units, GatewayIntent,
        GatewayPaymentState, GatewayRefund, IntentMetadata, PaymentGateway, WebhookEvent,
    },
};

pub const SIGNATURE_HEADER: &str = "Stripe-Signature";

#[derive(Debug, Deserialize)]
struct PaymentIntentResponse {
    id: String,
    client_secret: Option<String>,
    status: String,
    #[serde(default)]
    last_payment_error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RefundResponse {
    id: String,
    amount: i64,
}

#[derive(Debug, Deserialize)]
struct EventEnvelope {
    #[serde(rename = "type")]
    kind: String,
    data: EventData,
}

#[derive(Debug, Deserialize)]
struct EventData {
    object: EventObject,
}

#[derive(Debug, Deserialize)]
struct EventObject {
    id: String,
}

pub struct StripeGateway {
    http_client: reqwest::Client,
    secret_key: String,
    webhook_secret: String,
    api_base: String,
}

impl StripeGateway {
    pub fn new(
        http_client: reqwest::Client,
        secret_key: String,
        webhook_secret: String,
        api_base: String,
    ) -> Self {
        Self {
            http_client,
            secret_key,
            webhook_secret,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }
}

/// Maps a PaymentIntent status onto ours.
///
/// A `requires_payment_method` intent that carries a payment error has had an attempt
/// declined; without one the customer simply has not paid yet.
fn intent_status(status: &str, has_error: bool) -> PaymentStatus {
    match status {
        "succeeded" => PaymentStatus::Completed,
        "canceled" => PaymentStatus::Failed,
        "requires_payment_method" if has_error => PaymentStatus::Failed,
        _ => PaymentStatus::Created,
    }
}

/// Parses a verified Stripe event body.
pub(crate) fn parse_event(payload: &[u8]) -> Result<WebhookEvent, GatewayError> {
    let event: EventEnvelope = serde_json::from_slice(payload)
        .map_err(|e| GatewayError::MalformedPayload(e.to_string()))?;

    Ok(match event.kind.as_str() {
        "payment_intent.succeeded" => WebhookEvent::PaymentSucceeded {
            payment_id: event.data.object.id.clone(),
            intent_id: event.data.object.id,
        },
        "payment_intent.payment_failed" | "payment_intent.canceled" => {
            WebhookEvent::PaymentFailed {
                intent_id: event.data.object.id,
            }
        }
        _ => WebhookEvent::Ignored(event.kind),
    })
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    fn kind(&self) -> PaymentGatewayKind {
        PaymentGatewayKind::Stripe
    }

    fn signature_header(&self) -> &'static str {
        SIGNATURE_HEADER
    }

    async fn create_intent(
        &self,
        amount: i64,
        currency: &str,
        metadata: &IntentMetadata,
    ) -> Result<GatewayIntent, GatewayError> {
        let form = [
            ("amount", to_minor_units(amount)?.to_string()),
            ("currency", currency.to_lowercase()),
            ("automatic_payment_methods[enabled]", "true".to_string()),
            ("metadata[booking_id]", metadata.booking_id.to_string()),
            ("metadata[user_id]", metadata.user_id.to_string()),
        ];

        let response = self
            .http_client
            .post(format!("{}/v1/payment_intents", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await?;

        let intent = ensure_success(response)
            .await?
            .json::<PaymentIntentResponse>()
            .await?;

        let client_secret = intent.client_secret.ok_or_else(|| {
            GatewayError::UnexpectedResponse("PaymentIntent without client_secret".to_string())
        })?;

        Ok(GatewayIntent {
            id: intent.id,
            client_secret,
        })
    }

    async fn confirm(&self, intent_id: &str) -> Result<GatewayPaymentState, GatewayError> {
        let response = self
            .http_client
            .get(format!("{}/v1/payment_intents/{}", self.api_base, intent_id))
            .bearer_auth(&self.secret_key)
            .send()
            .await?;

        let intent = ensure_success(response)
            .await?
            .json::<PaymentIntentResponse>()
            .await?;

        let status = intent_status(&intent.status, intent.last_payment_error.is_some());

        // Refunds are issued against the intent itself.
        Ok(GatewayPaymentState {
            payment_id: (status == PaymentStatus::Completed).then_some(intent.id),
            status,
        })
    }

    async fn refund(
        &self,
        payment_id: &str,
        amount: Option<i64>,
    ) -> Result<GatewayRefund, GatewayError> {
        let mut form = vec![("payment_intent", payment_id.to_string())];
        if let Some(amount) = amount {
            form.push(("amount", to_minor_units(amount)?.to_string()));
        }

        let response = self
            .http_client
            .post(format!("{}/v1/refunds", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(&form)
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
        now: DateTime<Utc>,
    ) -> Result<WebhookEvent, GatewayError> {
        let header = signature.ok_or(GatewayError::InvalidSignature)?;
        signature::verify_stripe(header, payload, &self.webhook_secret, now)?;

        parse_event(payload)
    }
}
