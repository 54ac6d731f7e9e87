use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use crate::{
    model::{
        api::MessageDto,
        pg::{AvailabilityQuery, CreatePgDto, PaginatedPgsDto, PgSearchQuery, UpdatePgDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::pg::{CreatePgParams, SearchPgParams, UpdatePgParams},
        service::{booking::BookingService, pg::PgService},
        state::AppState,
    },
};

/// Search approved, active listings.
///
/// Supports city, price range, room kind, amenities (comma separated, all must
/// match), gender preference, free-text search, sort and pagination.
///
/// # Returns
/// - `200 OK` - One page of listings
/// - `400 Bad Request` - Unknown sort key or inverted price range
pub async fn search_pgs(
    State(state): State<AppState>,
    Query(query): Query<PgSearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let params = SearchPgParams::from_query(query)?;

    let page = PgService::new(&state.db, &state.locks).search(params).await?;

    Ok((
        StatusCode::OK,
        Json(PaginatedPgsDto {
            pagination: page.pagination_dto(),
            pgs: page.items.into_iter().map(|pg| pg.into_dto()).collect(),
        }),
    ))
}

/// Get a publicly listed PG with its room types.
///
/// # Returns
/// - `200 OK` - The listing
/// - `404 Not Found` - Unknown, unapproved or deactivated listing
pub async fn get_pg(
    State(state): State<AppState>,
    Path(pg_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let pg = PgService::new(&state.db, &state.locks).get(pg_id).await?;

    Ok((StatusCode::OK, Json(pg.into_dto())))
}

/// Create a listing. New listings wait for admin approval before they are searchable.
///
/// # Access Control
/// - `Owner` - Owners and admins
///
/// # Returns
/// - `201 Created` - The listing, not yet approved
/// - `400 Bad Request` - Invalid fields or no room types
/// - `401 Unauthorized` / `403 Forbidden` - Not authenticated or not an owner
pub async fn create_pg(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreatePgDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Owner])
        .await?;

    let params = CreatePgParams::from_dto(user.id, payload)?;
    let pg = PgService::new(&state.db, &state.locks)
        .create(params, Utc::now())
        .await?;

    Ok((StatusCode::CREATED, Json(pg.into_dto())))
}

/// Update a listing.
///
/// # Access Control
/// - `Owner` - The listing's owner, or any admin
///
/// # Returns
/// - `200 OK` - The updated listing
/// - `400 Bad Request` - Invalid fields
/// - `403 Forbidden` - Caller does not own the listing
/// - `404 Not Found` - Unknown listing
/// - `409 Conflict` - A removed room type still has bookings
pub async fn update_pg(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(pg_id): Path<i32>,
    Json(payload): Json<UpdatePgDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Owner])
        .await?;

    let params = UpdatePgParams::from_dto(pg_id, payload)?;
    let pg = PgService::new(&state.db, &state.locks)
        .update(&user, params, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(pg.into_dto())))
}

/// Deactivate a listing.
///
/// # Access Control
/// - `Owner` - The listing's owner, or any admin
pub async fn delete_pg(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(pg_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Owner])
        .await?;

    PgService::new(&state.db, &state.locks)
        .soft_delete(pg_id, &user, Utc::now())
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: "PG deactivated".to_string(),
        }),
    ))
}

/// List the caller's own listings, including pending and rejected ones.
///
/// # Access Control
/// - `Owner` - Owners and admins
pub async fn get_my_pgs(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Owner])
        .await?;

    let pgs = PgService::new(&state.db, &state.locks)
        .owner_listings(user.id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(pgs.into_iter().map(|pg| pg.into_dto()).collect::<Vec<_>>()),
    ))
}

/// Check whether a room type has a free room for a window.
///
/// # Returns
/// - `200 OK` - Free room count and the price of the stay
/// - `400 Bad Request` - Invalid window
/// - `404 Not Found` - Unknown listing or room type
pub async fn check_availability(
    State(state): State<AppState>,
    Path(pg_id): Path<i32>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, AppError> {
    let availability = BookingService::new(&state.db, &state.locks)
        .availability(
            pg_id,
            query.room_type_id,
            query.check_in,
            query.check_out,
            Utc::now(),
        )
        .await?;

    Ok((StatusCode::OK, Json(availability.into_dto())))
}
