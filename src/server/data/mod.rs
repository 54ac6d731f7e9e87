//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! domain in the application. Repositories are generic over `ConnectionTrait` so the same
//! queries run against the pool or inside a transaction, and they convert entity models
//! to domain models at this boundary where the caller does not need raw columns.

pub mod booking;
pub mod payment;
pub mod pg;
pub mod review;
pub mod room_type;
pub mod user;

#[cfg(test)]
mod test;
