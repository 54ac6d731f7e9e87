use crate::server::{
    error::{auth::AuthError, AppError},
    model::user::RegisterParams,
    service::{
        auth::{google::GoogleIdentity, AuthService},
        password::hash_password,
        token::TokenService,
    },
};
use chrono::{Duration, Utc};
use entity::{prelude::User, sea_orm_active_enums::UserRole};
use test_utils::{builder::TestBuilder, factory};

mod register;

fn tokens() -> TokenService {
    TokenService::new("test-secret", 7)
}

fn register_params(email: &str) -> RegisterParams {
    RegisterParams {
        name: "Asha Rao".to_string(),
        email: email.to_string(),
        password: "secret123".to_string(),
        phone: None,
        role: UserRole::User,
    }
}
