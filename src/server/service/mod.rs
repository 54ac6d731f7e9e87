//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Implementing core business rules and validation
//! - **Orchestration**: Coordinating multiple repository calls and the payment gateway
//! - **Domain Models**: Working with domain models rather than DTOs or entity models
//! - **Transaction Management**: Holding reservation locks and transactions around
//!   read-then-write sequences

pub mod admin;
pub mod auth;
pub mod availability;
pub mod booking;
pub mod lock;
pub mod password;
pub mod payment;
pub mod pg;
pub mod review;
pub mod token;
