//! Admin endpoints: platform dashboard, listing moderation and account management.
//!
//! Every handler requires the admin role.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use crate::{
    model::{
        admin::{
            AdminBookingQuery, AdminPgQuery, AdminUserQuery, PaginatedUsersDto, RejectPgDto,
            SetRoleDto,
        },
        booking::PaginatedBookingsDto,
        pg::PaginatedPgsDto,
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::admin::AdminService,
        state::AppState,
        util::pagination::PageRequest,
    },
};

async fn require_admin(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<entity::user::Model, AppError> {
    AuthGuard::new(&state.db, &state.tokens, headers)
        .require(&[Permission::Admin])
        .await
}

/// Platform totals: accounts by role, listings, bookings by status and revenue from
/// completed payments.
pub async fn dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &headers).await?;

    let dashboard = AdminService::new(&state.db).dashboard().await?;

    Ok((StatusCode::OK, Json(dashboard.into_dto())))
}

/// Listings filtered by moderation state (`pending`, `approved`, `rejected`, `all`).
pub async fn get_pgs(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<AdminPgQuery>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &headers).await?;

    let page = AdminService::new(&state.db)
        .pgs(
            query.status.unwrap_or_default(),
            PageRequest::new(query.page, query.limit),
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(PaginatedPgsDto {
            pagination: page.pagination_dto(),
            pgs: page.items.into_iter().map(|pg| pg.into_dto()).collect(),
        }),
    ))
}

pub async fn get_users(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<AdminUserQuery>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &headers).await?;

    let page = AdminService::new(&state.db)
        .users(query.role, PageRequest::new(query.page, query.limit))
        .await?;

    Ok((
        StatusCode::OK,
        Json(PaginatedUsersDto {
            pagination: page.pagination_dto(),
            users: page.items.into_iter().map(|u| u.into_dto()).collect(),
        }),
    ))
}

pub async fn get_bookings(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<AdminBookingQuery>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &headers).await?;

    let page = AdminService::new(&state.db)
        .bookings(query.status, PageRequest::new(query.page, query.limit))
        .await?;

    Ok((
        StatusCode::OK,
        Json(PaginatedBookingsDto {
            pagination: page.pagination_dto(),
            bookings: page.items.into_iter().map(|b| b.into_dto()).collect(),
        }),
    ))
}

/// Approve a listing, making it searchable once active.
///
/// # Returns
/// - `200 OK` - The approved listing
/// - `404 Not Found` - Unknown listing
pub async fn approve_pg(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(pg_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &headers).await?;

    let pg = AdminService::new(&state.db)
        .approve(pg_id, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(pg.into_dto())))
}

/// Reject a listing with a reason shown to its owner.
///
/// # Returns
/// - `200 OK` - The rejected listing
/// - `400 Bad Request` - Empty or overlong reason
/// - `404 Not Found` - Unknown listing
pub async fn reject_pg(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(pg_id): Path<i32>,
    Json(payload): Json<RejectPgDto>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &headers).await?;

    let pg = AdminService::new(&state.db)
        .reject(pg_id, &payload.reason, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(pg.into_dto())))
}

/// Activate or deactivate an account. Admins cannot deactivate themselves.
pub async fn toggle_user_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let admin = require_admin(&state, &headers).await?;

    let user = AdminService::new(&state.db)
        .toggle_user_status(&admin, user_id, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

pub async fn set_user_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<i32>,
    Json(payload): Json<SetRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = require_admin(&state, &headers).await?;

    let user = AdminService::new(&state.db)
        .set_role(&admin, user_id, payload.role, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}
