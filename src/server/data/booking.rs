//! Booking data repository for database operations.
//!
//! This module provides the `BookingRepository` for reservations. The overlap count
//! here is the authority for availability: a booking is admitted only when fewer
//! active bookings than rooms overlap its window. Callers that count and then insert
//! must hold the room type's reservation lock and run both steps in one transaction.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::{BookingPaymentStatus, BookingStatus};
use sea_orm::{
    sea_query::Query, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait,
    DbErr, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::{
    model::booking::{Booking, CreateBookingParams},
    util::pagination::{Page, PageRequest},
};

/// Which bookings a listing or aggregate query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingScope {
    /// Bookings made by this user.
    Guest(i32),
    /// Bookings on any listing owned by this user.
    Owner(i32),
    /// Every booking on the platform.
    All,
}

impl BookingScope {
    fn condition(self) -> Condition {
        match self {
            BookingScope::Guest(user_id) => {
                Condition::all().add(entity::booking::Column::UserId.eq(user_id))
            }
            BookingScope::Owner(owner_id) => Condition::all().add(
                entity::booking::Column::PgId.in_subquery(
                    Query::select()
                        .column(entity::pg::Column::Id)
                        .from(entity::pg::Entity)
                        .and_where(entity::pg::Column::OwnerId.eq(owner_id))
                        .to_owned(),
                ),
            ),
            BookingScope::All => Condition::all(),
        }
    }
}

/// Repository providing database operations for bookings.
pub struct BookingRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> BookingRepository<'a, C> {
    /// Creates a new BookingRepository instance.
    ///
    /// # Arguments
    /// - `db` - Database connection or open transaction
    ///
    /// # Returns
    /// - `BookingRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a pending, unpaid booking.
    ///
    /// # Arguments
    /// - `params` - Validated reservation request
    /// - `total_amount` - Price for the whole stay
    /// - `now` - Creation timestamp
    ///
    /// # Returns
    /// - `Ok(Model)` - The created booking row
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(
        &self,
        params: &CreateBookingParams,
        total_amount: i64,
        now: DateTime<Utc>,
    ) -> Result<entity::booking::Model, DbErr> {
        entity::booking::ActiveModel {
            user_id: ActiveValue::Set(params.user_id),
            pg_id: ActiveValue::Set(params.pg_id),
            room_type_id: ActiveValue::Set(params.room_type_id),
            check_in: ActiveValue::Set(params.check_in),
            check_out: ActiveValue::Set(params.check_out),
            guests: ActiveValue::Set(params.guests),
            total_amount: ActiveValue::Set(total_amount),
            booking_status: ActiveValue::Set(BookingStatus::Pending),
            payment_status: ActiveValue::Set(BookingPaymentStatus::Pending),
            special_requests: ActiveValue::Set(params.special_requests.clone()),
            cancellation_reason: ActiveValue::Set(None),
            cancelled_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::booking::Model>, DbErr> {
        entity::prelude::Booking::find_by_id(id).one(self.db).await
    }

    /// Gets a booking joined with its listing's name.
    pub async fn get_with_pg(&self, id: i32) -> Result<Option<Booking>, DbErr> {
        let row = entity::prelude::Booking::find_by_id(id)
            .find_also_related(entity::prelude::Pg)
            .one(self.db)
            .await?;

        Ok(row.map(|(booking, pg)| Booking::from_entity(booking, pg)))
    }

    /// Counts active bookings of a room type whose stay overlaps `[check_in, check_out]`.
    ///
    /// Both ends are inclusive, so a stay that starts on the instant another ends
    /// still counts as overlapping. Passing the same instant twice counts the
    /// bookings holding a room at that instant.
    ///
    /// # Arguments
    /// - `pg_id` - Listing the room type belongs to
    /// - `room_type_id` - Room type to check
    /// - `check_in` - Start of the requested window
    /// - `check_out` - End of the requested window
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of overlapping pending or confirmed bookings
    /// - `Err(DbErr)` - Database error during count
    pub async fn count_overlapping(
        &self,
        pg_id: i32,
        room_type_id: i32,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        entity::prelude::Booking::find()
            .filter(entity::booking::Column::PgId.eq(pg_id))
            .filter(entity::booking::Column::RoomTypeId.eq(room_type_id))
            .filter(entity::booking::Column::BookingStatus.is_in(BookingStatus::ACTIVE))
            .filter(entity::booking::Column::CheckIn.lte(check_out))
            .filter(entity::booking::Column::CheckOut.gte(check_in))
            .count(self.db)
            .await
    }

    /// Whether any booking, in any status, references the room type.
    pub async fn exists_for_room_type(&self, room_type_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Booking::find()
            .filter(entity::booking::Column::RoomTypeId.eq(room_type_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets bookings with pagination, newest first, with listing names attached.
    ///
    /// # Arguments
    /// - `scope` - Whose bookings to return
    /// - `status` - Optional booking status filter
    /// - `page` - Page number and size
    ///
    /// # Returns
    /// - `Ok(Page<Booking>)` - Bookings for the requested page plus the total matching count
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_paginated(
        &self,
        scope: BookingScope,
        status: Option<BookingStatus>,
        page: PageRequest,
    ) -> Result<Page<Booking>, DbErr> {
        let mut query = entity::prelude::Booking::find().filter(scope.condition());
        if let Some(status) = status {
            query = query.filter(entity::booking::Column::BookingStatus.eq(status));
        }

        let paginator = query
            .order_by_desc(entity::booking::Column::CreatedAt)
            .order_by_desc(entity::booking::Column::Id)
            .find_also_related(entity::prelude::Pg)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.index()).await?;
        let bookings = rows
            .into_iter()
            .map(|(booking, pg)| Booking::from_entity(booking, pg))
            .collect();

        Ok(Page::new(bookings, total, page))
    }

    /// Most recently created bookings in `scope`.
    pub async fn get_recent(&self, scope: BookingScope, limit: u64) -> Result<Vec<Booking>, DbErr> {
        let rows = entity::prelude::Booking::find()
            .filter(scope.condition())
            .order_by_desc(entity::booking::Column::CreatedAt)
            .order_by_desc(entity::booking::Column::Id)
            .limit(limit)
            .find_also_related(entity::prelude::Pg)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(booking, pg)| Booking::from_entity(booking, pg))
            .collect())
    }

    /// Moves a booking to a new status.
    ///
    /// Moving to cancelled also stamps `cancelled_at` and stores the reason. The
    /// transition itself must already have been validated.
    pub async fn set_status(
        &self,
        booking: entity::booking::Model,
        status: BookingStatus,
        reason: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<entity::booking::Model, DbErr> {
        let mut active = booking.into_active_model();
        active.booking_status = ActiveValue::Set(status);
        if status == BookingStatus::Cancelled {
            active.cancelled_at = ActiveValue::Set(Some(now));
            active.cancellation_reason = ActiveValue::Set(reason);
        }
        active.updated_at = ActiveValue::Set(now);
        active.update(self.db).await
    }

    /// Records a payment outcome on the booking, optionally moving its status too.
    pub async fn set_payment_status(
        &self,
        booking: entity::booking::Model,
        payment_status: BookingPaymentStatus,
        booking_status: Option<BookingStatus>,
        now: DateTime<Utc>,
    ) -> Result<entity::booking::Model, DbErr> {
        let mut active = booking.into_active_model();
        active.payment_status = ActiveValue::Set(payment_status);
        if let Some(status) = booking_status {
            active.booking_status = ActiveValue::Set(status);
        }
        active.updated_at = ActiveValue::Set(now);
        active.update(self.db).await
    }

    /// Number of bookings per status in `scope`.
    pub async fn count_by_status(
        &self,
        scope: BookingScope,
    ) -> Result<Vec<(BookingStatus, i64)>, DbErr> {
        entity::prelude::Booking::find()
            .filter(scope.condition())
            .select_only()
            .column(entity::booking::Column::BookingStatus)
            .column_as(entity::booking::Column::Id.count(), "count")
            .group_by(entity::booking::Column::BookingStatus)
            .into_tuple::<(BookingStatus, i64)>()
            .all(self.db)
            .await
    }

    /// Sum of `total_amount` over paid bookings in `scope`.
    pub async fn paid_revenue(&self, scope: BookingScope) -> Result<i64, DbErr> {
        let revenue = entity::prelude::Booking::find()
            .filter(scope.condition())
            .filter(entity::booking::Column::PaymentStatus.eq(BookingPaymentStatus::Paid))
            .select_only()
            .column_as(entity::booking::Column::TotalAmount.sum(), "revenue")
            .into_tuple::<Option<i64>>()
            .one(self.db)
            .await?;

        Ok(revenue.flatten().unwrap_or(0))
    }
}
