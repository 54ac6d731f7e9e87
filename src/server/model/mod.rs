//! Server-side domain models and parameter types.
//!
//! Domain models are converted from entity models at the repository boundary and
//! transformed to DTOs at the controller boundary. Parameter types carry validated
//! operation inputs from controllers into services, and the pure business rules
//! (stay validation, cancellation window, status transitions, rating rounding) live
//! next to the types they govern.

pub mod admin;
pub mod booking;
pub mod payment;
pub mod pg;
pub mod review;
pub mod user;
