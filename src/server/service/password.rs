//! Argon2 password hashing.
//!
//! Hashing is CPU-bound, so both operations run on the blocking thread pool.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use tokio::sync::OnceCell;

use crate::server::error::AppError;

/// Hash verified on login misses, created on first use.
pub(crate) static DUMMY_HASH: OnceCell<String> = OnceCell::const_new();

/// Hashes `password` into a PHC string with a fresh random salt.
pub async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::InternalError(format!("Failed to hash password: {}", e)))
    })
    .await?
}

/// Checks `password` against a stored PHC string.
///
/// # Returns
/// - `Ok(true)` - Password matches
/// - `Ok(false)` - Password does not match
/// - `Err(AppError::InternalError)` - Stored hash is not a valid PHC string
pub async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || {
        let parsed = PasswordHash::new(&hash)
            .map_err(|e| AppError::InternalError(format!("Stored password hash invalid: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    })
    .await?
}

/// Runs one Argon2 verification against a throwaway hash and discards the result.
///
/// Login calls this when there is no stored hash to check, so a miss costs about as
/// much as a wrong password.
pub async fn verify_dummy_password(password: String) -> Result<(), AppError> {
    let hash = DUMMY_HASH
        .get_or_try_init(|| hash_password("dummy-password".to_string()))
        .await?
        .clone();

    verify_password(password, hash).await?;

    Ok(())
}
