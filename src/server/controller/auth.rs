use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use crate::{
    model::{
        api::MessageDto,
        user::{
            ChangePasswordDto, ForgotPasswordDto, GoogleLoginDto, LoginDto, RegisterDto,
            ResetPasswordDto, UpdateProfileDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::user::{RegisterParams, User},
        service::auth::{google::GoogleVerifier, AuthService},
        state::AppState,
    },
};

/// Response text for forgot-password, identical whether or not the account exists.
const RESET_REQUESTED_MESSAGE: &str =
    "If an account exists for that e-mail, a password reset link has been sent";

/// Register a new account.
///
/// # Returns
/// - `201 Created` - Token and the new user
/// - `400 Bad Request` - Invalid fields, `admin` role requested or e-mail already registered
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterDto>,
) -> Result<impl IntoResponse, AppError> {
    let params = RegisterParams::from_dto(payload)?;

    let session = AuthService::new(&state.db, &state.tokens)
        .register(params, Utc::now())
        .await?;

    Ok((StatusCode::CREATED, Json(session.into_dto())))
}

/// Log in with e-mail and password.
///
/// # Returns
/// - `200 OK` - Token and user
/// - `401 Unauthorized` - Unknown e-mail or wrong password
/// - `403 Forbidden` - Account deactivated
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let session = AuthService::new(&state.db, &state.tokens)
        .login(&payload.email, payload.password, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(session.into_dto())))
}

/// Log in with a Google ID token, creating or linking the account.
///
/// # Returns
/// - `200 OK` - Token and user
/// - `400 Bad Request` - Google login is not configured
/// - `401 Unauthorized` - Credential rejected by Google or issued for another client
pub async fn google(
    State(state): State<AppState>,
    Json(payload): Json<GoogleLoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let Some(client_id) = state.google_client_id.as_deref() else {
        return Err(AppError::BadRequest(
            "Google login is not enabled".to_string(),
        ));
    };

    let identity = GoogleVerifier::new(&state.http_client, client_id)
        .verify(&payload.credential)
        .await?;

    let session = AuthService::new(&state.db, &state.tokens)
        .google(identity, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(session.into_dto())))
}

/// Start a password reset. Always answers with the same message.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthService::new(&state.db, &state.tokens)
        .forgot_password(&payload.email, &state.app_url, Utc::now())
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: RESET_REQUESTED_MESSAGE.to_string(),
        }),
    ))
}

/// Complete a password reset with the token from the reset link.
///
/// # Returns
/// - `200 OK` - Password changed
/// - `400 Bad Request` - Token unknown, expired or already used, or password too short
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthService::new(&state.db, &state.tokens)
        .reset_password(&payload.token, payload.password, Utc::now())
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: "Password has been reset".to_string(),
        }),
    ))
}

/// Get the authenticated user.
///
/// # Access Control
/// - Any authenticated, active user
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    Ok((StatusCode::OK, Json(User::from_entity(user).into_dto())))
}

pub async fn update_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<UpdateProfileDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let user = AuthService::new(&state.db, &state.tokens)
        .update_profile(user, payload.name, payload.phone, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Change the password of the authenticated user.
///
/// # Returns
/// - `200 OK` - Password changed
/// - `400 Bad Request` - Current password wrong, new password too short or account has
///   no password
pub async fn change_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ChangePasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    AuthService::new(&state.db, &state.tokens)
        .change_password(
            user,
            payload.current_password,
            payload.new_password,
            Utc::now(),
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: "Password updated".to_string(),
        }),
    ))
}
