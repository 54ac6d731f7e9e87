//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::server::{
    gateway::PaymentGateway,
    service::{lock::ReservationLocks, token::TokenService},
};

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - `reqwest::Client` uses an `Arc` internally
/// - `TokenService` and `ReservationLocks` wrap their state in an `Arc`
/// - `Arc<dyn PaymentGateway>` is a reference-counted pointer
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// HTTP client for external API requests such as Google token verification.
    ///
    /// Configured without redirects.
    pub http_client: reqwest::Client,

    /// Issues and verifies bearer tokens.
    pub tokens: TokenService,

    /// Per-room-type locks serializing reservations and payment transitions.
    pub locks: ReservationLocks,

    /// Payment gateway selected by configuration.
    pub gateway: Arc<dyn PaymentGateway>,

    /// Lowercase ISO currency code charged for every booking.
    pub currency: String,

    /// Google OAuth client id. Google login is disabled when unset.
    pub google_client_id: Option<String>,

    /// Frontend base URL used to build password reset links.
    pub app_url: String,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        http_client: reqwest::Client,
        tokens: TokenService,
        gateway: Arc<dyn PaymentGateway>,
        currency: String,
        google_client_id: Option<String>,
        app_url: String,
    ) -> Self {
        Self {
            db,
            http_client,
            tokens,
            locks: ReservationLocks::new(),
            gateway,
            currency,
            google_client_id,
            app_url,
        }
    }
}
