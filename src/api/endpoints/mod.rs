//! API endpoint handlers.
//!
//! Handlers are thin: parse the request, call into `dashboard`, map errors.

pub mod data;
pub mod health;
