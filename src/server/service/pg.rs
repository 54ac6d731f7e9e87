//! Listing service: search, public reads and owner management.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::UserRole;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{booking::BookingRepository, pg::PgRepository, room_type::RoomTypeRepository},
    error::{auth::AuthError, booking::BookingError, AppError},
    model::pg::{CreatePgParams, Pg, SearchPgParams, UpdatePgParams},
    service::{availability::AvailabilityService, lock::ReservationLocks},
    util::pagination::Page,
};

pub struct PgService<'a> {
    db: &'a DatabaseConnection,
    locks: &'a ReservationLocks,
}

impl<'a> PgService<'a> {
    pub fn new(db: &'a DatabaseConnection, locks: &'a ReservationLocks) -> Self {
        Self { db, locks }
    }

    /// Searches approved, active listings.
    pub async fn search(&self, params: SearchPgParams) -> Result<Page<Pg>, AppError> {
        Ok(PgRepository::new(self.db).search(&params).await?)
    }

    /// Gets a publicly visible listing; unapproved or inactive listings are not found.
    pub async fn get(&self, pg_id: i32) -> Result<Pg, AppError> {
        PgRepository::new(self.db)
            .get_with_relations(pg_id)
            .await?
            .filter(Pg::is_listed)
            .ok_or_else(|| AppError::NotFound("PG not found".to_string()))
    }

    /// Creates a listing awaiting admin approval.
    pub async fn create(&self, params: CreatePgParams, now: DateTime<Utc>) -> Result<Pg, AppError> {
        let txn = self.db.begin().await?;
        let pg = PgRepository::new(&txn)
            .create(params, now)
            .await
            .map_err(|e| AppError::on_unique_violation(e, "Duplicate amenity"))?;
        txn.commit().await?;

        tracing::info!("PG {} created by owner {}", pg.id, pg.owner_id);

        Ok(pg)
    }

    /// Applies a partial update on behalf of the owner or an admin.
    ///
    /// When room types are supplied they become the listing's ordered collection:
    /// entries with an id update that room type, entries without one are added, and
    /// room types left out are removed. A room type that any booking references is
    /// kept and the update fails with 409. Every touched room type gets its
    /// availability cache refreshed in the same transaction.
    ///
    /// # Arguments
    /// - `actor` - Authenticated caller
    /// - `params` - Validated partial update
    /// - `now` - Update timestamp
    ///
    /// # Returns
    /// - `Ok(Pg)` - The updated listing
    /// - `Err(AppError::NotFound)` - No such listing
    /// - `Err(AppError::AuthErr(AccessDenied))` - Caller does not own the listing
    /// - `Err(AppError::BadRequest)` - A room type id belongs to another listing
    /// - `Err(AppError::BookingErr(RoomTypeInUse))` - A removed room type has bookings
    pub async fn update(
        &self,
        actor: &entity::user::Model,
        params: UpdatePgParams,
        now: DateTime<Utc>,
    ) -> Result<Pg, AppError> {
        let pg = self.find_managed(params.id, actor).await?;

        let existing = RoomTypeRepository::new(self.db).get_by_pg(pg.id).await?;
        let mut guards = Vec::new();
        if params.room_types.is_some() {
            let mut ids: Vec<i32> = existing.iter().map(|rt| rt.id).collect();
            ids.sort_unstable();
            for id in ids {
                guards.push(self.locks.acquire(pg.id, id).await);
            }
        }

        let txn = self.db.begin().await?;
        let pgs = PgRepository::new(&txn);
        let pg = pgs.update(pg, &params, now).await?;

        if let Some(amenities) = params.amenities {
            pgs.replace_amenities(pg.id, amenities)
                .await
                .map_err(|e| AppError::on_unique_violation(e, "Duplicate amenity"))?;
        }

        if let Some(room_types) = params.room_types {
            let repo = RoomTypeRepository::new(&txn);
            let availability = AvailabilityService::new(&txn);
            let existing = repo.get_by_pg(pg.id).await?;

            let mut kept = Vec::with_capacity(room_types.len());
            for (position, room_type) in room_types.iter().enumerate() {
                let position = position as i32;
                let model = match room_type.id {
                    Some(id) => {
                        let current = existing
                            .iter()
                            .find(|rt| rt.id == id)
                            .cloned()
                            .ok_or_else(|| {
                                AppError::BadRequest(format!(
                                    "Room type {} does not belong to this PG",
                                    id
                                ))
                            })?;
                        repo.update(current, position, room_type).await?
                    }
                    None => repo.create(pg.id, position, room_type).await?,
                };
                availability.refresh_cache(&model, now).await?;
                kept.push(model.id);
            }

            let bookings = BookingRepository::new(&txn);
            for removed in existing.iter().filter(|rt| !kept.contains(&rt.id)) {
                if bookings.exists_for_room_type(removed.id).await? {
                    return Err(BookingError::RoomTypeInUse(removed.id).into());
                }
                repo.delete(removed.id).await?;
            }
        }

        let updated = PgRepository::new(&txn)
            .get_with_relations(pg.id)
            .await?
            .ok_or_else(|| AppError::NotFound("PG not found".to_string()))?;
        txn.commit().await?;
        drop(guards);

        tracing::info!("PG {} updated by user {}", updated.id, actor.id);

        Ok(updated)
    }

    /// Deactivates a listing. Existing bookings are left untouched.
    pub async fn soft_delete(
        &self,
        pg_id: i32,
        actor: &entity::user::Model,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let pg = self.find_managed(pg_id, actor).await?;
        PgRepository::new(self.db).set_active(pg, false, now).await?;

        tracing::info!("PG {} deactivated by user {}", pg_id, actor.id);

        Ok(())
    }

    /// All listings of an owner regardless of moderation state.
    pub async fn owner_listings(&self, owner_id: i32) -> Result<Vec<Pg>, AppError> {
        Ok(PgRepository::new(self.db).get_by_owner(owner_id).await?)
    }

    /// Loads a listing the actor may manage: its owner or any admin.
    async fn find_managed(
        &self,
        pg_id: i32,
        actor: &entity::user::Model,
    ) -> Result<entity::pg::Model, AppError> {
        let pg = PgRepository::new(self.db)
            .find_by_id(pg_id)
            .await?
            .ok_or_else(|| AppError::NotFound("PG not found".to_string()))?;

        if pg.owner_id != actor.id && actor.role != UserRole::Admin {
            return Err(AuthError::AccessDenied(
                actor.id,
                format!("User does not own PG {}", pg_id),
            )
            .into());
        }

        Ok(pg)
    }
}
