//! usersvc-server: users HTTP service over PostgreSQL
//!
//! The interesting part lives in [`db`]: column allow-listing for dynamic
//! lookups, upsert-by-email creation, and row mapping. [`http`] is a thin
//! axum layer on top of the [`db::UserStore`] port.

pub mod db;
pub mod http;
pub mod models;
pub mod state;

pub use state::AppState;
