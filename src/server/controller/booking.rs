use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use crate::{
    model::booking::{
        BookingListQuery, CancelBookingDto, CreateBookingDto, PaginatedBookingsDto,
        UpdateBookingStatusDto,
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::booking::CreateBookingParams,
        service::booking::BookingService,
        state::AppState,
    },
};

/// Reserve a room.
///
/// The availability check and insert run under the room type's reservation lock, so
/// two requests racing for the last room cannot both succeed.
///
/// # Access Control
/// - Any authenticated, active user
///
/// # Returns
/// - `201 Created` - Pending booking with its total amount
/// - `400 Bad Request` - Invalid window or guest count
/// - `404 Not Found` - Unknown or unlisted PG, or room type not part of it
/// - `409 Conflict` - No room of that type is free for the whole window
pub async fn create_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateBookingDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let params = CreateBookingParams::from_dto(user.id, payload);
    let booking = BookingService::new(&state.db, &state.locks)
        .create(params, Utc::now())
        .await?;

    Ok((StatusCode::CREATED, Json(booking.into_dto())))
}

/// The caller's bookings, optionally filtered by status.
pub async fn get_my_bookings(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<BookingListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let page = BookingService::new(&state.db, &state.locks)
        .list_mine(user.id, query)
        .await?;

    Ok((
        StatusCode::OK,
        Json(PaginatedBookingsDto {
            pagination: page.pagination_dto(),
            bookings: page.items.into_iter().map(|b| b.into_dto()).collect(),
        }),
    ))
}

/// Get one booking.
///
/// # Access Control
/// - The guest, the listing's owner, or any admin
pub async fn get_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(booking_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let booking = BookingService::new(&state.db, &state.locks)
        .get(booking_id, &user)
        .await?;

    Ok((StatusCode::OK, Json(booking.into_dto())))
}

/// Cancel a booking.
///
/// # Access Control
/// - The guest, the listing's owner, or any admin
///
/// # Returns
/// - `200 OK` - The cancelled booking; its room is free again
/// - `400 Bad Request` - Booking already cancelled or completed, or the guest is
///   inside the 24 hour notice window
/// - `403 Forbidden` - Caller may not cancel this booking
pub async fn cancel_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(booking_id): Path<i32>,
    payload: Option<Json<CancelBookingDto>>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let reason = payload.and_then(|Json(dto)| dto.reason);
    let booking = BookingService::new(&state.db, &state.locks)
        .cancel(booking_id, &user, reason, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(booking.into_dto())))
}

/// Move a booking through its lifecycle on behalf of the listing's owner.
///
/// # Access Control
/// - `Owner` - The listing's owner, or any admin
///
/// # Returns
/// - `200 OK` - The updated booking
/// - `400 Bad Request` - Transition not allowed from the current status
/// - `403 Forbidden` - Caller does not own the listing
pub async fn update_booking_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(booking_id): Path<i32>,
    Json(payload): Json<UpdateBookingStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Owner])
        .await?;

    let booking = BookingService::new(&state.db, &state.locks)
        .update_status(booking_id, &user, payload.status, payload.reason, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(booking.into_dto())))
}

/// Booking totals, revenue and recent bookings across the caller's listings.
///
/// # Access Control
/// - `Owner` - Owners and admins
pub async fn owner_dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Owner])
        .await?;

    let dashboard = BookingService::new(&state.db, &state.locks)
        .owner_dashboard(user.id)
        .await?;

    Ok((StatusCode::OK, Json(dashboard.into_dto())))
}
