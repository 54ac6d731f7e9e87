use entity::sea_orm_active_enums::{PaymentGatewayKind, PaymentStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDto {
    pub id: i32,
    pub booking_id: i32,
    pub gateway: PaymentGatewayKind,
    pub intent_id: String,
    pub gateway_payment_id: Option<String>,
    pub amount: i64,
    pub currency: String,
    pub status: PaymentStatus,
    pub refund_id: Option<String>,
    pub refunded_amount: Option<i64>,
}

/// Everything the frontend needs to open the gateway's checkout widget.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentDto {
    pub payment_id: i32,
    pub gateway: PaymentGatewayKind,
    pub intent_id: String,
    pub client_secret: String,
    pub amount: i64,
    pub currency: String,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreatePaymentIntentDto {
    pub booking_id: i32,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfirmPaymentDto {
    pub intent_id: String,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RefundDto {
    pub booking_id: i32,
    #[serde(default)]
    pub amount: Option<i64>,
}
