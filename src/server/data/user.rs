//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing account records. Lookups
//! used by authentication return the raw entity model because it carries the
//! password hash and reset token columns; listing methods return domain models.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::UserRole;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::{
    model::user::{CreateUserParams, User},
    util::pagination::{Page, PageRequest},
};

/// Repository providing database operations for user accounts.
pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Database connection or open transaction
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new, active account.
    ///
    /// # Arguments
    /// - `params` - Account fields; the e-mail must already be normalized
    /// - `now` - Creation timestamp
    ///
    /// # Returns
    /// - `Ok(Model)` - The created user row
    /// - `Err(DbErr)` - Database error, including unique violations on e-mail or Google id
    pub async fn create(
        &self,
        params: CreateUserParams,
        now: DateTime<Utc>,
    ) -> Result<entity::user::Model, DbErr> {
        entity::user::ActiveModel {
            name: ActiveValue::Set(params.name),
            email: ActiveValue::Set(params.email),
            password_hash: ActiveValue::Set(params.password_hash),
            phone: ActiveValue::Set(params.phone),
            google_id: ActiveValue::Set(params.google_id),
            role: ActiveValue::Set(params.role),
            is_active: ActiveValue::Set(true),
            reset_token_hash: ActiveValue::Set(None),
            reset_token_expires_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_by_id(id).one(self.db).await
    }

    /// Finds an account by normalized e-mail address.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await
    }

    pub async fn find_by_google_id(
        &self,
        google_id: &str,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::GoogleId.eq(google_id))
            .one(self.db)
            .await
    }

    /// Finds the account holding an unexpired password reset token.
    ///
    /// # Arguments
    /// - `token_hash` - Hex SHA-256 of the token sent to the user
    /// - `now` - Tokens expiring at or before this instant are ignored
    ///
    /// # Returns
    /// - `Ok(Some(Model))` - Account with a matching, live token
    /// - `Ok(None)` - No match or the token expired
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_reset_token(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::ResetTokenHash.eq(token_hash))
            .filter(entity::user::Column::ResetTokenExpiresAt.gt(now))
            .one(self.db)
            .await
    }

    /// Attaches a Google account id to an existing user.
    pub async fn link_google_id(
        &self,
        user: entity::user::Model,
        google_id: String,
        now: DateTime<Utc>,
    ) -> Result<entity::user::Model, DbErr> {
        let mut active = user.into_active_model();
        active.google_id = ActiveValue::Set(Some(google_id));
        active.updated_at = ActiveValue::Set(now);
        active.update(self.db).await
    }

    /// Updates name and/or phone. `None` leaves a field unchanged.
    pub async fn update_profile(
        &self,
        user: entity::user::Model,
        name: Option<String>,
        phone: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<entity::user::Model, DbErr> {
        let mut active = user.into_active_model();
        if let Some(name) = name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(phone) = phone {
            active.phone = ActiveValue::Set(Some(phone).filter(|p| !p.is_empty()));
        }
        active.updated_at = ActiveValue::Set(now);
        active.update(self.db).await
    }

    /// Replaces the password hash and clears any outstanding reset token.
    pub async fn set_password_hash(
        &self,
        user: entity::user::Model,
        password_hash: String,
        now: DateTime<Utc>,
    ) -> Result<entity::user::Model, DbErr> {
        let mut active = user.into_active_model();
        active.password_hash = ActiveValue::Set(Some(password_hash));
        active.reset_token_hash = ActiveValue::Set(None);
        active.reset_token_expires_at = ActiveValue::Set(None);
        active.updated_at = ActiveValue::Set(now);
        active.update(self.db).await
    }

    pub async fn set_reset_token(
        &self,
        user: entity::user::Model,
        token_hash: String,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<entity::user::Model, DbErr> {
        let mut active = user.into_active_model();
        active.reset_token_hash = ActiveValue::Set(Some(token_hash));
        active.reset_token_expires_at = ActiveValue::Set(Some(expires_at));
        active.updated_at = ActiveValue::Set(now);
        active.update(self.db).await
    }

    /// Activates or deactivates an account.
    pub async fn set_active(
        &self,
        user: entity::user::Model,
        is_active: bool,
        now: DateTime<Utc>,
    ) -> Result<entity::user::Model, DbErr> {
        let mut active = user.into_active_model();
        active.is_active = ActiveValue::Set(is_active);
        active.updated_at = ActiveValue::Set(now);
        active.update(self.db).await
    }

    pub async fn set_role(
        &self,
        user: entity::user::Model,
        role: UserRole,
        now: DateTime<Utc>,
    ) -> Result<entity::user::Model, DbErr> {
        let mut active = user.into_active_model();
        active.role = ActiveValue::Set(role);
        active.updated_at = ActiveValue::Set(now);
        active.update(self.db).await
    }

    /// Gets users with pagination, newest first.
    ///
    /// # Arguments
    /// - `role` - Optional role filter
    /// - `page` - Page number and size
    ///
    /// # Returns
    /// - `Ok(Page<User>)` - Users for the requested page plus the total matching count
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_paginated(
        &self,
        role: Option<UserRole>,
        page: PageRequest,
    ) -> Result<Page<User>, DbErr> {
        let mut query = entity::prelude::User::find();
        if let Some(role) = role {
            query = query.filter(entity::user::Column::Role.eq(role));
        }

        let paginator = query
            .order_by_desc(entity::user::Column::CreatedAt)
            .order_by_desc(entity::user::Column::Id)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page.index()).await?;
        let users = entities.into_iter().map(User::from_entity).collect();

        Ok(Page::new(users, total, page))
    }

    /// Number of accounts per role.
    pub async fn count_by_role(&self) -> Result<Vec<(UserRole, i64)>, DbErr> {
        entity::prelude::User::find()
            .select_only()
            .column(entity::user::Column::Role)
            .column_as(entity::user::Column::Id.count(), "count")
            .group_by(entity::user::Column::Role)
            .into_tuple::<(UserRole, i64)>()
            .all(self.db)
            .await
    }
}
