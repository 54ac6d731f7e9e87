use axum::{
    routing::{get, post, put},
    Router,
};

use crate::server::{
    controller::{admin, auth, booking, health, payment, pg, review},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .merge(auth_routes())
        .merge(pg_routes())
        .merge(booking_routes())
        .merge(payment_routes())
        .merge(admin_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/google", post(auth::google))
        .route("/api/auth/forgot-password", post(auth::forgot_password))
        .route("/api/auth/reset-password", post(auth::reset_password))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/profile", put(auth::update_profile))
        .route("/api/auth/change-password", put(auth::change_password))
}

fn pg_routes() -> Router<AppState> {
    Router::new()
        .route("/api/pgs", get(pg::search_pgs).post(pg::create_pg))
        .route("/api/pgs/owner/mine", get(pg::get_my_pgs))
        .route(
            "/api/pgs/{id}",
            get(pg::get_pg).put(pg::update_pg).delete(pg::delete_pg),
        )
        .route("/api/pgs/{id}/availability", get(pg::check_availability))
        .route(
            "/api/pgs/{id}/reviews",
            get(review::get_reviews).post(review::create_review),
        )
}

fn booking_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/bookings",
            get(booking::get_my_bookings).post(booking::create_booking),
        )
        .route("/api/bookings/owner/dashboard", get(booking::owner_dashboard))
        .route("/api/bookings/{id}", get(booking::get_booking))
        .route("/api/bookings/{id}/cancel", put(booking::cancel_booking))
        .route(
            "/api/bookings/{id}/status",
            put(booking::update_booking_status),
        )
}

fn payment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/payments/create-payment-intent",
            post(payment::create_payment_intent),
        )
        .route("/api/payments/confirm-payment", post(payment::confirm_payment))
        .route("/api/payments/refund", post(payment::refund))
        .route("/api/payments/webhook", post(payment::webhook))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/dashboard", get(admin::dashboard))
        .route("/api/admin/pgs", get(admin::get_pgs))
        .route("/api/admin/pgs/{id}/approve", put(admin::approve_pg))
        .route("/api/admin/pgs/{id}/reject", put(admin::reject_pg))
        .route("/api/admin/users", get(admin::get_users))
        .route(
            "/api/admin/users/{id}/toggle-status",
            put(admin::toggle_user_status),
        )
        .route("/api/admin/users/{id}/role", put(admin::set_user_role))
        .route("/api/admin/bookings", get(admin::get_bookings))
}
