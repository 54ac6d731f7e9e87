//! Request-level tests driving the full router with an in-memory database and the
//! fake payment gateway.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;

use crate::server::{
    gateway::fake::FakeGateway, router, service::token::TokenService, state::AppState,
};
use test_utils::{builder::TestBuilder, factory};


const JWT_SECRET: &str = "controller-secret";

fn app(db: &DatabaseConnection) -> Router {
    router::router().with_state(AppState::new(
        db.clone(),
        reqwest::Client::new(),
        TokenService::new(JWT_SECRET, 7),
        Arc::new(FakeGateway::new()),
        "inr".to_string(),
        None,
        "http://localhost:3000".to_string(),
    ))
}

fn token_for(user: &entity::user::Model) -> String {
    TokenService::new(JWT_SECRET, 7)
        .issue(user, Utc::now())
        .unwrap()
}

/// Sends one request and returns the status with the parsed JSON body
/// (`Value::Null` for an empty body).
async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}
