use crate::server::{
    data::{booking::BookingRepository, payment::PaymentRepository},
    error::{auth::AuthError, gateway::GatewayError, AppError},
    gateway::fake::FakeGateway,
    service::{lock::ReservationLocks, payment::PaymentService},
};
use chrono::Utc;
use entity::sea_orm_active_enums::{BookingPaymentStatus, BookingStatus, PaymentStatus};
use sea_orm::DatabaseConnection;
use test_utils::{builder::TestBuilder, factory};

mod confirm;
mod create_intent;
mod refund;

const CURRENCY: &str = "inr";

fn succeeded_event(intent_id: &str) -> Vec<u8> {
    format!(
        r#"{{"type":"payment_intent.succeeded","data":{{"object":{{"id":"{}"}}}}}}"#,
        intent_id
    )
    .into_bytes()
}

async fn booking(db: &DatabaseConnection, id: i32) -> entity::booking::Model {
    BookingRepository::new(db)
        .find_by_id(id)
        .await
        .unwrap()
        .unwrap()
}
