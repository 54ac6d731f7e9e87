//! Google Identity Services sign-in.
//!
//! The frontend obtains an ID token from Google and posts it here. The token is checked
//! against Google's tokeninfo endpoint, then the account is found by Google id, linked
//! by e-mail, or created.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::UserRole;
use serde::Deserialize;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, gateway::GatewayError, AppError},
    model::user::{normalize_email, AuthSession, CreateUserParams},
    service::auth::AuthService,
};

pub const GOOGLE_TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Google reports `email_verified` as `"true"` in tokeninfo but as a boolean elsewhere.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum VerifiedFlag {
    Bool(bool),
    Text(String),
}

impl VerifiedFlag {
    fn is_true(&self) -> bool {
        match self {
            Self::Bool(value) => *value,
            Self::Text(value) => value == "true",
        }
    }
}

/// Subset of the tokeninfo response we rely on.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleTokenInfo {
    pub aud: String,
    pub sub: String,
    pub email: Option<String>,
    pub email_verified: Option<VerifiedFlag>,
    pub name: Option<String>,
}

/// A verified Google account.
#[derive(Debug, Clone, PartialEq)]
pub struct GoogleIdentity {
    pub google_id: String,
    pub email: String,
    pub name: String,
}

impl GoogleTokenInfo {
    /// Checks the audience and verified e-mail and extracts the identity.
    pub fn into_identity(self, client_id: &str) -> Result<GoogleIdentity, AuthError> {
        if self.aud != client_id {
            return Err(AuthError::InvalidToken(format!(
                "Google token issued for another client: {}",
                self.aud
            )));
        }

        if !self.email_verified.as_ref().is_some_and(VerifiedFlag::is_true) {
            return Err(AuthError::InvalidToken(
                "Google account e-mail is not verified".to_string(),
            ));
        }

        let email = self
            .email
            .as_deref()
            .and_then(|email| normalize_email(email).ok())
            .ok_or_else(|| AuthError::InvalidToken("Google token has no e-mail".to_string()))?;

        let name = self
            .name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());

        Ok(GoogleIdentity {
            google_id: self.sub,
            email,
            name,
        })
    }
}

/// Verifies Google ID tokens for the configured OAuth client.
pub struct GoogleVerifier<'a> {
    http_client: &'a reqwest::Client,
    client_id: &'a str,
}

impl<'a> GoogleVerifier<'a> {
    pub fn new(http_client: &'a reqwest::Client, client_id: &'a str) -> Self {
        Self {
            http_client,
            client_id,
        }
    }

    pub async fn verify(&self, credential: &str) -> Result<GoogleIdentity, AppError> {
        let response = self
            .http_client
            .get(GOOGLE_TOKENINFO_URL)
            .query(&[("id_token", credential)])
            .send()
            .await
            .map_err(GatewayError::from)?;

        if !response.status().is_success() {
            return Err(AuthError::InvalidToken(format!(
                "Google rejected credential with {}",
                response.status()
            ))
            .into());
        }

        let info = response
            .json::<GoogleTokenInfo>()
            .await
            .map_err(GatewayError::from)?;

        Ok(info.into_identity(self.client_id)?)
    }
}

impl<'a> AuthService<'a> {
    /// Signs in with a verified Google identity.
    ///
    /// An existing account with the same e-mail and no Google id gets linked; an e-mail
    /// already linked to a different Google account is refused.
    pub async fn google(
        &self,
        identity: GoogleIdentity,
        now: DateTime<Utc>,
    ) -> Result<AuthSession, AppError> {
        let user_repo = UserRepository::new(self.db);

        let user = match user_repo.find_by_google_id(&identity.google_id).await? {
            Some(user) => user,
            None => match user_repo.find_by_email(&identity.email).await? {
                Some(user) if user.google_id.is_none() => {
                    tracing::info!("Linking Google account to user {}", user.id);
                    user_repo
                        .link_google_id(user, identity.google_id, now)
                        .await?
                }
                Some(user) => {
                    tracing::warn!(
                        "Google sign-in for user {} with a different Google id",
                        user.id
                    );
                    return Err(AuthError::InvalidCredentials.into());
                }
                None => {
                    let user = user_repo
                        .create(
                            CreateUserParams {
                                name: identity.name,
                                email: identity.email,
                                password_hash: None,
                                phone: None,
                                role: UserRole::User,
                                google_id: Some(identity.google_id),
                            },
                            now,
                        )
                        .await
                        .map_err(|e| AppError::on_unique_violation(e, "User already exists"))?;
                    tracing::info!("Registered user {} through Google", user.id);
                    user
                }
            },
        };

        if !user.is_active {
            return Err(AuthError::AccountDeactivated(user.id).into());
        }

        self.session(user, now)
    }
}
