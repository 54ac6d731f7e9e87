use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum GatewayError {
    /// Transport failure talking to the gateway.
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// Gateway answered with a non-success status.
    #[error("Gateway returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Gateway response was missing a field we rely on.
    #[error("Unexpected gateway response: {0}")]
    UnexpectedResponse(String),

    /// Webhook signature header absent, malformed, stale or not matching.
    #[error("Invalid webhook signature")]
    InvalidSignature,

    /// Webhook body passed verification but is not a payload we understand.
    #[error("Malformed webhook payload: {0}")]
    MalformedPayload(String),
}

/// - `InvalidSignature` / `MalformedPayload` → 400 Bad Request
/// - upstream failures → 502 Bad Gateway with a generic message
impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidSignature | Self::MalformedPayload(_) => {
                tracing::warn!("Rejected webhook: {}", self);
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorDto {
                        error: self.to_string(),
                    }),
                )
                    .into_response()
            }
            err => {
                tracing::error!("Payment gateway error: {}", err);
                (
                    StatusCode::BAD_GATEWAY,
                    Json(ErrorDto {
                        error: "Payment gateway error, please try again".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
