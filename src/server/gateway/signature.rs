//! Webhook signature verification.
//!
//! Both gateways sign webhooks with HMAC-SHA256. Stripe signs `"{timestamp}.{body}"`
//! and sends `t=<timestamp>,v1=<hex>` so stale deliveries can be refused; Razorpay
//! signs the raw body and sends the bare hex digest. Digests are compared in constant
//! time.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::server::error::gateway::GatewayError;

type HmacSha256 = Hmac<Sha256>;

/// Maximum age, in seconds, of a Stripe signature timestamp.
pub const STRIPE_TOLERANCE_SECONDS: i64 = 300;

fn mac(secret: &str) -> Result<HmacSha256, GatewayError> {
    HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| GatewayError::InvalidSignature)
}

/// Hex HMAC-SHA256 of `parts` concatenated, keyed by `secret`.
pub fn sign_hex(secret: &str, parts: &[&[u8]]) -> Result<String, GatewayError> {
    let mut mac = mac(secret)?;
    for part in parts {
        mac.update(part);
    }
    Ok(hex::encode(mac.finalize().into_bytes()))
}

fn matches(secret: &str, parts: &[&[u8]], signature_hex: &str) -> Result<bool, GatewayError> {
    let Ok(expected) = hex::decode(signature_hex.trim()) else {
        return Ok(false);
    };

    let mut mac = mac(secret)?;
    for part in parts {
        mac.update(part);
    }
    Ok(mac.verify_slice(&expected).is_ok())
}

/// Verifies a `Stripe-Signature` header.
///
/// Accepts the delivery when any `v1` signature matches and the timestamp is within
/// [`STRIPE_TOLERANCE_SECONDS`] of `now`.
pub fn verify_stripe(
    header: &str,
    payload: &[u8],
    secret: &str,
    now: DateTime<Utc>,
) -> Result<(), GatewayError> {
    let mut timestamp = None;
    let mut signatures = Vec::new();

    for item in header.split(',') {
        match item.trim().split_once('=') {
            Some(("t", value)) => timestamp = value.parse::<i64>().ok(),
            Some(("v1", value)) => signatures.push(value),
            _ => {}
        }
    }

    let Some(timestamp) = timestamp else {
        return Err(GatewayError::InvalidSignature);
    };

    let skewed = now
        .timestamp()
        .checked_sub(timestamp)
        .is_none_or(|drift| drift.abs() > STRIPE_TOLERANCE_SECONDS);
    if skewed {
        tracing::warn!("Stripe webhook timestamp {} outside tolerance", timestamp);
        return Err(GatewayError::InvalidSignature);
    }

    let signed_timestamp = format!("{}.", timestamp);
    for signature in signatures {
        if matches(secret, &[signed_timestamp.as_bytes(), payload], signature)? {
            return Ok(());
        }
    }

    Err(GatewayError::InvalidSignature)
}

/// Verifies an `X-Razorpay-Signature` header.
pub fn verify_razorpay(signature: &str, payload: &[u8], secret: &str) -> Result<(), GatewayError> {
    if matches(secret, &[payload], signature)? {
        Ok(())
    } else {
        Err(GatewayError::InvalidSignature)
    }
}
