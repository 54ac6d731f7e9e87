//! Account authentication: password and Google sign-in, profile and password management.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::{
        normalize_email, validate_name, validate_password, AuthSession, CreateUserParams,
        RegisterParams, User,
    },
    service::{
        password::{hash_password, verify_dummy_password, verify_password},
        token::TokenService,
    },
};

pub mod google;
pub mod reset;

const DUPLICATE_EMAIL: &str = "User already exists";

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    tokens: &'a TokenService,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection, tokens: &'a TokenService) -> Self {
        Self { db, tokens }
    }

    /// Creates an account and signs the caller in.
    ///
    /// # Returns
    /// - `Ok(AuthSession)` - New account and its token
    /// - `Err(AppError::BadRequest)` - E-mail already registered
    pub async fn register(
        &self,
        params: RegisterParams,
        now: DateTime<Utc>,
    ) -> Result<AuthSession, AppError> {
        let user_repo = UserRepository::new(self.db);

        if user_repo.find_by_email(&params.email).await?.is_some() {
            return Err(AppError::BadRequest(DUPLICATE_EMAIL.to_string()));
        }

        let password_hash = hash_password(params.password).await?;
        let user = user_repo
            .create(
                CreateUserParams {
                    name: params.name,
                    email: params.email,
                    password_hash: Some(password_hash),
                    phone: params.phone,
                    role: params.role,
                    google_id: None,
                },
                now,
            )
            .await
            .map_err(|e| AppError::on_unique_violation(e, DUPLICATE_EMAIL))?;

        tracing::info!("Registered user {} as {:?}", user.id, user.role);

        self.session(user, now)
    }

    /// Signs in with e-mail and password.
    ///
    /// Unknown e-mail, accounts without a password and wrong passwords all fail with
    /// the same `InvalidCredentials` error after the same amount of Argon2 work.
    pub async fn login(
        &self,
        email: &str,
        password: String,
        now: DateTime<Utc>,
    ) -> Result<AuthSession, AppError> {
        let Ok(email) = normalize_email(email) else {
            verify_dummy_password(password).await?;
            return Err(AuthError::InvalidCredentials.into());
        };

        let Some(user) = UserRepository::new(self.db).find_by_email(&email).await? else {
            verify_dummy_password(password).await?;
            return Err(AuthError::InvalidCredentials.into());
        };

        let Some(hash) = user.password_hash.clone() else {
            verify_dummy_password(password).await?;
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(password, hash).await? {
            tracing::warn!("Failed login for user {}", user.id);
            return Err(AuthError::InvalidCredentials.into());
        }

        if !user.is_active {
            return Err(AuthError::AccountDeactivated(user.id).into());
        }

        self.session(user, now)
    }

    /// Updates name and/or phone of the caller.
    pub async fn update_profile(
        &self,
        user: entity::user::Model,
        name: Option<String>,
        phone: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<User, AppError> {
        let name = name.map(|n| validate_name(&n)).transpose()?;
        let phone = phone.map(|p| p.trim().to_string());

        let user = UserRepository::new(self.db)
            .update_profile(user, name, phone, now)
            .await?;

        Ok(User::from_entity(user))
    }

    /// Replaces the caller's password after checking the current one.
    ///
    /// Accounts created through Google have no password to check and cannot use this.
    pub async fn change_password(
        &self,
        user: entity::user::Model,
        current_password: String,
        new_password: String,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        validate_password(&new_password)?;

        let Some(hash) = user.password_hash.clone() else {
            return Err(AppError::BadRequest(
                "Account has no password set".to_string(),
            ));
        };

        if !verify_password(current_password, hash).await? {
            return Err(AppError::BadRequest(
                "Current password is incorrect".to_string(),
            ));
        }

        let user_id = user.id;
        let hash = hash_password(new_password).await?;
        UserRepository::new(self.db)
            .set_password_hash(user, hash, now)
            .await?;

        tracing::info!("User {} changed their password", user_id);

        Ok(())
    }

    fn session(&self, user: entity::user::Model, now: DateTime<Utc>) -> Result<AuthSession, AppError> {
        let token = self.tokens.issue(&user, now)?;

        Ok(AuthSession {
            token,
            user: User::from_entity(user),
        })
    }
}
