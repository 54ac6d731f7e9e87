//! Test fixtures providing reusable test data without database insertion.
//!
//! Fixtures create in-memory entity models for unit tests that exercise pure
//! business rules (pricing, cancellation windows, DTO conversion). Unlike
//! factories, fixtures do NOT insert data into the database.
//!
//! # Example
//!
//! ```rust,ignore
//! use test_utils::fixture;
//!
//! let booking = fixture::booking::entity_builder()
//!     .booking_status(BookingStatus::Confirmed)
//!     .build();
//! ```

pub mod booking;
pub mod pg;
pub mod room_type;
pub mod user;

pub use booking::{entity as booking_entity, entity_builder as booking_entity_builder};
pub use pg::entity as pg_entity;
pub use room_type::entity as room_type_entity;
pub use user::{entity as user_entity, entity_builder as user_entity_builder};
