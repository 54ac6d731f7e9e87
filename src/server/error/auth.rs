use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Request carried no `Authorization: Bearer` header.
    #[error("No bearer token provided")]
    MissingToken,

    /// Token failed signature or expiry validation.
    #[error("Invalid bearer token: {0}")]
    InvalidToken(String),

    /// Token is valid but its subject no longer exists.
    #[error("User {0} from token not found in database")]
    UserNotInDatabase(i32),

    /// Unknown e-mail or wrong password. Both map to the same response.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Account was deactivated by an admin.
    #[error("User {0} is deactivated")]
    AccountDeactivated(i32),

    /// User lacks the role or ownership required for the operation.
    ///
    /// The message is logged, never sent to the client.
    #[error("User {0} denied access: {1}")]
    AccessDenied(i32, String),
}

/// Converts authentication errors into HTTP responses.
///
/// - `MissingToken` / `InvalidToken` / `UserNotInDatabase` → 401 "Not authorized"
/// - `InvalidCredentials` → 401 "Invalid credentials"
/// - `AccountDeactivated` → 403 "Account is deactivated"
/// - `AccessDenied` → 403 "Access denied"
///
/// All errors are logged at debug level for diagnostics while keeping client-facing messages
/// generic to avoid information leakage.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::MissingToken | Self::InvalidToken(_) | Self::UserNotInDatabase(_) => {
                (StatusCode::UNAUTHORIZED, "Not authorized, please log in")
            }
            Self::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
            Self::AccountDeactivated(_) => (StatusCode::FORBIDDEN, "Account is deactivated"),
            Self::AccessDenied(_, _) => (StatusCode::FORBIDDEN, "Access denied"),
        };

        (
            status,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
