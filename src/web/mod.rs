//! HTTP surface: two dashboard pages, a JSON API over the same reports,
//! health and Prometheus endpoints.

pub mod handlers;
pub mod models;
pub mod router;
pub mod state;
pub mod templates;

pub use router::app_router;
pub use state::AppState;
