//! HTTP request handlers.
//!
//! Handlers authenticate through [`AuthGuard`](crate::server::middleware::auth::AuthGuard),
//! convert request DTOs into service parameters and convert domain models back into
//! response DTOs. Business rules live in the service layer.

pub mod admin;
pub mod auth;
pub mod booking;
pub mod health;
pub mod payment;
pub mod pg;
pub mod review;

#[cfg(test)]
mod test;
