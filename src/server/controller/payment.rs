use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::json;

use crate::{
    model::payment::{ConfirmPaymentDto, CreatePaymentIntentDto, RefundDto},
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::payment::PaymentService,
        state::AppState,
    },
};

fn service(state: &AppState) -> PaymentService<'_> {
    PaymentService::new(
        &state.db,
        state.gateway.as_ref(),
        &state.locks,
        &state.currency,
    )
}

/// Open a payment intent for the full amount of a pending booking.
///
/// # Access Control
/// - The booking's guest
///
/// # Returns
/// - `201 Created` - Intent id and the client secret for checkout
/// - `400 Bad Request` - Booking not pending or already paid
/// - `403 Forbidden` - Booking belongs to another user
/// - `502 Bad Gateway` - Gateway call failed
pub async fn create_payment_intent(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreatePaymentIntentDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let intent = service(&state)
        .create_intent(&user, payload.booking_id, Utc::now())
        .await?;

    Ok((StatusCode::CREATED, Json(intent.into_dto())))
}

/// Ask the gateway for an intent's state and apply it to the booking.
pub async fn confirm_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ConfirmPaymentDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let payment = service(&state)
        .confirm(&user, &payload.intent_id, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(payment.into_dto())))
}

/// Refund a paid booking, fully or partially.
///
/// # Access Control
/// - `Admin` - Only admins
pub async fn refund(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<RefundDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let payment = service(&state)
        .refund(&user, payload.booking_id, payload.amount, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(payment.into_dto())))
}

/// Gateway webhook.
///
/// Takes the raw body because the signature covers the exact bytes sent. No bearer
/// token; the gateway signature authenticates the request.
///
/// # Returns
/// - `200 OK` - Event applied, already applied, or not relevant
/// - `400 Bad Request` - Missing or invalid signature, or unparsable payload
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let signature = headers
        .get(state.gateway.signature_header())
        .and_then(|value| value.to_str().ok());

    if let Err(err) = service(&state).webhook(signature, &body, Utc::now()).await {
        tracing::warn!("Rejected payment webhook: {}", err);
        return Err(err);
    }

    Ok((StatusCode::OK, Json(json!({ "received": true }))))
}
