pub use sea_orm_migration::prelude::*;

mod m20260101_000001_create_user_table;
mod m20260101_000002_create_pg_table;
mod m20260101_000003_create_pg_amenity_table;
mod m20260101_000004_create_room_type_table;
mod m20260101_000005_create_booking_table;
mod m20260101_000006_create_review_table;
mod m20260101_000007_create_payment_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_user_table::Migration),
            Box::new(m20260101_000002_create_pg_table::Migration),
            Box::new(m20260101_000003_create_pg_amenity_table::Migration),
            Box::new(m20260101_000004_create_room_type_table::Migration),
            Box::new(m20260101_000005_create_booking_table::Migration),
            Box::new(m20260101_000006_create_review_table::Migration),
            Box::new(m20260101_000007_create_payment_table::Migration),
        ]
    }
}
