use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::server::{
    data::user::UserRepository,
    error::AppError,
    model::user::{normalize_email, validate_password},
    service::{auth::AuthService, password::hash_password},
};

/// Reset tokens stop working after this many minutes.
const RESET_TOKEN_TTL_MINUTES: i64 = 60;

/// Hex SHA-256 of a reset token; only this digest is stored.
pub fn hash_reset_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

fn generate_reset_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    hex::encode(bytes)
}

impl<'a> AuthService<'a> {
    /// Starts a password reset.
    ///
    /// Callers respond identically whether or not the account exists. When it does, a
    /// random token is generated, its digest stored with a one hour expiry and the reset
    /// link written to the log.
    ///
    /// # Returns
    /// - `Ok(Some(token))` - Token issued for an existing account
    /// - `Ok(None)` - No account with that e-mail
    pub async fn forgot_password(
        &self,
        email: &str,
        app_url: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<String>, AppError> {
        let email = normalize_email(email)?;
        let user_repo = UserRepository::new(self.db);

        let Some(user) = user_repo.find_by_email(&email).await? else {
            tracing::debug!("Password reset requested for unknown e-mail");
            return Ok(None);
        };

        let token = generate_reset_token();
        let expires_at = now + Duration::minutes(RESET_TOKEN_TTL_MINUTES);
        let user = user_repo
            .set_reset_token(user, hash_reset_token(&token), expires_at, now)
            .await?;

        tracing::info!(
            "Password reset link for user {}: {}/reset-password/{}",
            user.id,
            app_url.trim_end_matches('/'),
            token
        );

        Ok(Some(token))
    }

    /// Sets a new password using an unexpired reset token. The token is single use.
    pub async fn reset_password(
        &self,
        token: &str,
        password: String,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        validate_password(&password)?;

        let user_repo = UserRepository::new(self.db);
        let Some(user) = user_repo
            .find_by_reset_token(&hash_reset_token(token.trim()), now)
            .await?
        else {
            return Err(AppError::BadRequest(
                "Invalid or expired reset token".to_string(),
            ));
        };

        let user_id = user.id;
        let hash = hash_password(password).await?;
        user_repo.set_password_hash(user, hash, now).await?;

        tracing::info!("Password reset for user {}", user_id);

        Ok(())
    }
}
