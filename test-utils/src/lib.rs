//! PG Stay Test Utils
//!
//! Shared setup for repository, service and request-level tests. Every test gets its own
//! in-memory SQLite database holding only the tables it asks for, plus factories that
//! insert users, listings, room types, bookings, reviews and payments with defaults.
//!
//! # Overview
//!
//! The test utilities consist of these components:
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing the database connection
//! - **TestError**: Error types that can occur during test setup
//! - **factory**: Builders that insert entities with sensible defaults
//! - **fixture**: In-memory entity models that never touch the database
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn books_a_listing() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_booking_tables()
//!         .build()
//!         .await?;
//!     let db = test.db.as_ref().unwrap();
//!
//!     let (owner, pg, room_type) = factory::helpers::create_listing(db).await?;
//!     // Reserve, cancel, pay...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod fixture;
