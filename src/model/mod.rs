//! Request and response DTOs for the HTTP API.
//!
//! Every request body rejects unknown fields so malformed payloads fail at the
//! extractor instead of reaching a service. Field names are camelCase on the wire.

pub mod admin;
pub mod api;
pub mod booking;
pub mod payment;
pub mod pg;
pub mod review;
pub mod user;
