//! User account domain model.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::UserRole;

use crate::{
    model::user::{RegisterDto, UserDto},
    server::error::AppError,
};

const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            phone: entity.phone,
            role: entity.role,
            is_active: entity.is_active,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            role: self.role,
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}

/// Insert parameters for a new account. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub phone: Option<String>,
    pub role: UserRole,
    pub google_id: Option<String>,
}

/// Validated self-registration request. The password is still plain text.
#[derive(Debug, Clone)]
pub struct RegisterParams {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub role: UserRole,
}

impl RegisterParams {
    /// Only `user` and `owner` accounts can sign themselves up.
    pub fn from_dto(dto: RegisterDto) -> Result<Self, AppError> {
        let role = dto.role.unwrap_or(UserRole::User);
        if role == UserRole::Admin {
            return Err(AppError::BadRequest(
                "Cannot register as admin".to_string(),
            ));
        }

        validate_password(&dto.password)?;

        Ok(Self {
            name: validate_name(&dto.name)?,
            email: normalize_email(&dto.email)?,
            password: dto.password,
            phone: dto
                .phone
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
            role,
        })
    }
}

/// A successful login or registration: the account plus a signed token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

impl AuthSession {
    pub fn into_dto(self) -> crate::model::user::AuthResponseDto {
        crate::model::user::AuthResponseDto {
            token: self.token,
            user: self.user.into_dto(),
        }
    }
}

/// Lower-cases and trims an e-mail address, rejecting obviously malformed input.
pub fn normalize_email(email: &str) -> Result<String, AppError> {
    let email = email.trim().to_lowercase();

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };

    if !valid {
        return Err(AppError::BadRequest(
            "Please provide a valid email".to_string(),
        ));
    }

    Ok(email)
}

pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > 100 {
        return Err(AppError::BadRequest(
            "Name must be between 1 and 100 characters".to_string(),
        ));
    }
    Ok(name.to_string())
}
