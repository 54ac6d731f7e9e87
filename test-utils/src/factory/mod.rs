//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Factories insert into the database and expect their
//! foreign key parents to exist already; `helpers` builds whole dependency chains.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Create with defaults
//!     let user = factory::user::create_user(&db).await?;
//!
//!     // Create an approved listing with one room type
//!     let (owner, pg, room_type) = factory::helpers::create_listing(&db).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let owner = factory::user::UserFactory::new(&db)
//!     .role(UserRole::Owner)
//!     .build()
//!     .await?;
//!
//! let room_type = factory::room_type::RoomTypeFactory::new(&db, pg.id)
//!     .total_rooms(2)
//!     .price(1000)
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - Create user accounts
//! - `pg` - Create listings
//! - `room_type` - Create room types under a listing
//! - `booking` - Create bookings
//! - `review` - Create reviews
//! - `payment` - Create payment records
//! - `helpers` - Convenience methods for creating entities with dependencies

pub mod booking;
pub mod helpers;
pub mod payment;
pub mod pg;
pub mod review;
pub mod room_type;
pub mod user;

pub use booking::create_booking;
pub use payment::create_payment;
pub use pg::create_pg;
pub use review::create_review;
pub use room_type::create_room_type;
pub use user::create_user;
