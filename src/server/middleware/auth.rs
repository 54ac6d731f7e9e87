//! Bearer token authentication and role checks.
//!
//! Controllers build an [`AuthGuard`] from the request headers and call
//! [`AuthGuard::require`] with the permissions the endpoint needs. The token only
//! identifies the caller; the account is re-read on every request so role changes and
//! deactivation take effect immediately.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use entity::sea_orm_active_enums::UserRole;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    service::token::TokenService,
};

pub enum Permission {
    /// Account has the admin role.
    Admin,
    /// Account can manage listings: owners and admins.
    Owner,
}

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    tokens: &'a TokenService,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, tokens: &'a TokenService, headers: &'a HeaderMap) -> Self {
        Self {
            db,
            tokens,
            headers,
        }
    }

    /// Authenticates the caller and checks every permission in `permissions`.
    ///
    /// # Returns
    /// - `Ok(user::Model)` - Active account holding all permissions
    /// - `Err(AuthError::MissingToken)` - No bearer token in the request
    /// - `Err(AuthError::InvalidToken)` - Bad signature, expired or malformed token
    /// - `Err(AuthError::UserNotInDatabase)` - Token subject no longer exists
    /// - `Err(AuthError::AccountDeactivated)` - Account deactivated by an admin
    /// - `Err(AuthError::AccessDenied)` - A permission is not satisfied
    pub async fn require(
        &self,
        permissions: &[Permission],
    ) -> Result<entity::user::Model, AppError> {
        let token = bearer_token(self.headers)?;
        let claims = self.tokens.verify(token)?;
        let user_id = claims.user_id()?;

        let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        if !user.is_active {
            return Err(AuthError::AccountDeactivated(user.id).into());
        }

        for permission in permissions {
            match permission {
                Permission::Admin => {
                    if user.role != UserRole::Admin {
                        return Err(AuthError::AccessDenied(
                            user.id,
                            "Endpoint requires the admin role".to_string(),
                        )
                        .into());
                    }
                }
                Permission::Owner => {
                    if !matches!(user.role, UserRole::Owner | UserRole::Admin) {
                        return Err(AuthError::AccessDenied(
                            user.id,
                            "Endpoint requires the owner role".to_string(),
                        )
                        .into());
                    }
                }
            }
        }

        Ok(user)
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let (scheme, token) = value.split_once(' ').ok_or(AuthError::MissingToken)?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AuthError::MissingToken);
    }

    Ok(token)
}
