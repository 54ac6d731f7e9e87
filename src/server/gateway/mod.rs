//! Payment gateway adapters.
//!
//! Services talk to the configured gateway through [`PaymentGateway`]. Amounts cross
//! this boundary in whole currency units; adapters convert to minor units on the wire.
//! Webhook payloads are only parsed after [`PaymentGateway::verify_webhook`] has checked
//! their signature.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::{PaymentGatewayKind, PaymentStatus};

use crate::server::error::gateway::GatewayError;

pub mod razorpay;
pub mod signature;
pub mod stripe;

#[cfg(test)]
pub mod fake;

/// Identifiers attached to a gateway intent so it can be traced back to a booking.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentMetadata {
    pub booking_id: i32,
    pub user_id: i32,
}

/// A payment intent (Stripe) or order (Razorpay) opened with the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayIntent {
    pub id: String,
    /// Value the frontend hands to the checkout widget.
    pub client_secret: String,
}

/// The gateway's current view of an intent.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayPaymentState {
    /// `Created` while the customer has not finished paying.
    pub status: PaymentStatus,
    /// Identifier refunds are issued against, once a payment exists.
    pub payment_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GatewayRefund {
    pub id: String,
    /// Refunded amount in whole currency units.
    pub amount: i64,
}

/// A verified webhook delivery reduced to what changes payment state.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookEvent {
    PaymentSucceeded {
        intent_id: String,
        payment_id: String,
    },
    PaymentFailed {
        intent_id: String,
    },
    /// Any other event type; acknowledged and otherwise ignored.
    Ignored(String),
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    fn kind(&self) -> PaymentGatewayKind;

    /// Header carrying the webhook signature.
    fn signature_header(&self) -> &'static str;

    async fn create_intent(
        &self,
        amount: i64,
        currency: &str,
        metadata: &IntentMetadata,
    ) -> Result<GatewayIntent, GatewayError>;

    async fn confirm(&self, intent_id: &str) -> Result<GatewayPaymentState, GatewayError>;

    /// Refunds `amount`, or the whole payment when `None`.
    async fn refund(
        &self,
        payment_id: &str,
        amount: Option<i64>,
    ) -> Result<GatewayRefund, GatewayError>;

    /// Checks the signature against the raw body, then parses the event.
    fn verify_webhook(
        &self,
        signature: Option<&str>,
        payload: &[u8],
        now: DateTime<Utc>,
    ) -> Result<WebhookEvent, GatewayError>;
}

/// Whole currency units to the minor units gateways expect.
pub fn to_minor_units(amount: i64) -> Result<i64, GatewayError> {
    amount
        .checked_mul(100)
        .ok_or_else(|| GatewayError::UnexpectedResponse(format!("Amount {} too large", amount)))
}

/// Minor units back to whole currency units, dropping any fraction.
pub fn from_minor_units(amount: i64) -> i64 {
    amount / 100
}

/// Passes a successful response through, turning anything else into `GatewayError::Api`.
///
/// Both gateways report errors as `{"error": {"description"|"message": ...}}`.
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|json| {
            let error = json.get("error")?;
            error
                .get("message")
                .or_else(|| error.get("description"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or(body);

    Err(GatewayError::Api {
        status: status.as_u16(),
        message,
    })
}
