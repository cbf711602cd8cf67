//! HTTP API for the ICU dashboard.
//!
//! `dashboard_router()` returns a `Router` that can be mounted on any axum
//! server; `start_dashboard_server_on()` runs it on a bound socket.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::dashboard_router;
pub use server::{start_dashboard_server_on, DashboardServer, DashboardSession};
pub use types::ApiContext;
