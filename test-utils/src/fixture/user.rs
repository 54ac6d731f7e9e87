//! User fixtures for creating in-memory test data.

use chrono::{TimeZone, Utc};
use entity::{sea_orm_active_enums::UserRole, user};

/// Default test user email.
pub const DEFAULT_EMAIL: &str = "guest@example.com";

/// Creates a user entity model with default values.
///
/// # Default Values
/// - id: `1`
/// - name: `"Test Guest"`
/// - email: `"guest@example.com"`
/// - role: `UserRole::User`
/// - is_active: `true`
pub fn entity() -> user::Model {
    entity_builder().build()
}

/// Creates a user entity builder for customization.
pub fn entity_builder() -> UserEntityBuilder {
    UserEntityBuilder {
        id: 1,
        name: "Test Guest".to_string(),
        email: DEFAULT_EMAIL.to_string(),
        role: UserRole::User,
        is_active: true,
    }
}

pub struct UserEntityBuilder {
    id: i32,
    name: String,
    email: String,
    role: UserRole,
    is_active: bool,
}

impl UserEntityBuilder {
    pub fn id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn build(self) -> user::Model {
        let created = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        user::Model {
            id: self.id,
            name: self.name,
            email: self.email,
            password_hash: None,
            phone: None,
            google_id: None,
            role: self.role,
            is_active: self.is_active,
            reset_token_hash: None,
            reset_token_expires_at: None,
            created_at: created,
            updated_at: created,
        }
    }
}
