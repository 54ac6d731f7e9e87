//! Admin moderation of listings and accounts, and platform-wide reporting.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::{BookingStatus, UserRole};
use sea_orm::DatabaseConnection;

use crate::{
    model::admin::ModerationFilter,
    server::{
        data::{
            booking::{BookingRepository, BookingScope},
            payment::PaymentRepository,
            pg::PgRepository,
            user::UserRepository,
        },
        error::AppError,
        model::{
            admin::{AdminDashboard, UserCounts},
            booking::{Booking, BookingCounts},
            pg::Pg,
            user::User,
        },
        util::pagination::{Page, PageRequest},
    },
};

const MAX_REJECTION_REASON_LENGTH: usize = 500;

pub struct AdminService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AdminService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Account, listing and booking totals plus revenue from completed payments.
    pub async fn dashboard(&self) -> Result<AdminDashboard, AppError> {
        Ok(AdminDashboard {
            users: UserCounts::from_grouped(UserRepository::new(self.db).count_by_role().await?),
            pgs: PgRepository::new(self.db).counts().await?,
            bookings: BookingCounts::from_grouped(
                BookingRepository::new(self.db)
                    .count_by_status(BookingScope::All)
                    .await?,
            ),
            revenue: PaymentRepository::new(self.db).completed_revenue().await?,
        })
    }

    pub async fn pgs(
        &self,
        filter: ModerationFilter,
        page: PageRequest,
    ) -> Result<Page<Pg>, AppError> {
        Ok(PgRepository::new(self.db)
            .get_for_moderation(filter, page)
            .await?)
    }

    pub async fn users(
        &self,
        role: Option<UserRole>,
        page: PageRequest,
    ) -> Result<Page<User>, AppError> {
        Ok(UserRepository::new(self.db).get_paginated(role, page).await?)
    }

    pub async fn bookings(
        &self,
        status: Option<BookingStatus>,
        page: PageRequest,
    ) -> Result<Page<Booking>, AppError> {
        Ok(BookingRepository::new(self.db)
            .get_paginated(BookingScope::All, status, page)
            .await?)
    }

    /// Approves a listing and clears any earlier rejection reason.
    pub async fn approve(&self, pg_id: i32, now: DateTime<Utc>) -> Result<Pg, AppError> {
        let pgs = PgRepository::new(self.db);
        let pg = self.find_pg(pg_id).await?;
        pgs.set_approval(pg, true, None, now).await?;

        tracing::info!("PG {} approved", pg_id);

        self.load_pg(pg_id).await
    }

    /// Rejects a listing with a reason the owner can see.
    pub async fn reject(
        &self,
        pg_id: i32,
        reason: &str,
        now: DateTime<Utc>,
    ) -> Result<Pg, AppError> {
        let reason = reason.trim();
        if reason.is_empty() || reason.chars().count() > MAX_REJECTION_REASON_LENGTH {
            return Err(AppError::BadRequest(format!(
                "Rejection reason must be between 1 and {} characters",
                MAX_REJECTION_REASON_LENGTH
            )));
        }

        let pg = self.find_pg(pg_id).await?;
        PgRepository::new(self.db)
            .set_approval(pg, false, Some(reason.to_string()), now)
            .await?;

        tracing::info!("PG {} rejected", pg_id);

        self.load_pg(pg_id).await
    }

    /// Flips an account between active and deactivated.
    ///
    /// # Returns
    /// - `Ok(User)` - The account with its new status
    /// - `Err(AppError::NotFound)` - No such user
    /// - `Err(AppError::BadRequest)` - Admin attempted to deactivate their own account
    pub async fn toggle_user_status(
        &self,
        actor: &entity::user::Model,
        user_id: i32,
        now: DateTime<Utc>,
    ) -> Result<User, AppError> {
        let user = self.find_user(user_id).await?;

        if user.id == actor.id && user.is_active {
            return Err(AppError::BadRequest(
                "You cannot deactivate your own account".to_string(),
            ));
        }

        let is_active = !user.is_active;
        let user = UserRepository::new(self.db)
            .set_active(user, is_active, now)
            .await?;

        tracing::info!(
            "User {} {} by admin {}",
            user.id,
            if is_active { "activated" } else { "deactivated" },
            actor.id
        );

        Ok(User::from_entity(user))
    }

    /// Changes an account's role. Admins cannot change their own role.
    pub async fn set_role(
        &self,
        actor: &entity::user::Model,
        user_id: i32,
        role: UserRole,
        now: DateTime<Utc>,
    ) -> Result<User, AppError> {
        if user_id == actor.id {
            return Err(AppError::BadRequest(
                "You cannot change your own role".to_string(),
            ));
        }

        let user = self.find_user(user_id).await?;
        let user = UserRepository::new(self.db).set_role(user, role, now).await?;

        tracing::info!("User {} is now {:?} (admin {})", user.id, role, actor.id);

        Ok(User::from_entity(user))
    }

    async fn find_pg(&self, pg_id: i32) -> Result<entity::pg::Model, AppError> {
        PgRepository::new(self.db)
            .find_by_id(pg_id)
            .await?
            .ok_or_else(|| AppError::NotFound("PG not found".to_string()))
    }

    async fn load_pg(&self, pg_id: i32) -> Result<Pg, AppError> {
        PgRepository::new(self.db)
            .get_with_relations(pg_id)
            .await?
            .ok_or_else(|| AppError::NotFound("PG not found".to_string()))
    }

    async fn find_user(&self, user_id: i32) -> Result<entity::user::Model, AppError> {
        UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
