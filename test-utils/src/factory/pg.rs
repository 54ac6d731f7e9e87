//! Listing factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use entity::sea_orm_active_enums::GenderPreference;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating listings owned by an existing user.
///
/// Listings default to approved and active so they show up in public reads.
pub struct PgFactory<'a> {
    db: &'a DatabaseConnection,
    owner_id: i32,
    name: String,
    description: String,
    address: String,
    city: String,
    gender_preference: GenderPreference,
    is_approved: bool,
    is_active: bool,
}

impl<'a> PgFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, owner_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            owner_id,
            name: format!("Test PG {}", id),
            description: "Clean rooms close to the metro".to_string(),
            address: format!("{} MG Road", id),
            city: "Bengaluru".to_string(),
            gender_preference: GenderPreference::Any,
            is_approved: true,
            is_active: true,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    pub fn gender_preference(mut self, gender_preference: GenderPreference) -> Self {
        self.gender_preference = gender_preference;
        self
    }

    pub fn approved(mut self, is_approved: bool) -> Self {
        self.is_approved = is_approved;
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub async fn build(self) -> Result<entity::pg::Model, DbErr> {
        let now = Utc::now();
        entity::pg::ActiveModel {
            owner_id: ActiveValue::Set(self.owner_id),
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(self.description),
            address: ActiveValue::Set(self.address),
            city: ActiveValue::Set(self.city),
            state: ActiveValue::Set("Karnataka".to_string()),
            pincode: ActiveValue::Set("560001".to_string()),
            gender_preference: ActiveValue::Set(self.gender_preference),
            is_approved: ActiveValue::Set(self.is_approved),
            is_active: ActiveValue::Set(self.is_active),
            rejection_reason: ActiveValue::Set(None),
            rating: ActiveValue::Set(0.0),
            review_count: ActiveValue::Set(0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an approved, active listing for `owner_id`.
pub async fn create_pg(db: &DatabaseConnection, owner_id: i32) -> Result<entity::pg::Model, DbErr> {
    PgFactory::new(db, owner_id).build().await
}

/// Attaches an amenity to a listing.
pub async fn create_amenity(
    db: &DatabaseConnection,
    pg_id: i32,
    name: impl Into<String>,
) -> Result<entity::pg_amenity::Model, DbErr> {
    entity::pg_amenity::ActiveModel {
        pg_id: ActiveValue::Set(pg_id),
        name: ActiveValue::Set(name.into()),
        ..Default::default()
    }
    .insert(db)
    .await
}
