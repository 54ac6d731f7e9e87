//! Listing fixtures.

use chrono::{TimeZone, Utc};
use entity::{pg, sea_orm_active_enums::GenderPreference};

/// Creates an approved, active listing model with id `1` owned by user `1`.
pub fn entity() -> pg::Model {
    let created = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    pg::Model {
        id: 1,
        owner_id: 1,
        name: "Test PG".to_string(),
        description: "Clean rooms close to the metro".to_string(),
        address: "1 MG Road".to_string(),
        city: "Bengaluru".to_string(),
        state: "Karnataka".to_string(),
        pincode: "560001".to_string(),
        gender_preference: GenderPreference::Any,
        is_approved: true,
        is_active: true,
        rejection_reason: None,
        rating: 0.0,
        review_count: 0,
        created_at: created,
        updated_at: created,
    }
}
