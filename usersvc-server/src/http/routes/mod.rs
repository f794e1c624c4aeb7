//! Route handlers organized by resource

pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Everything served under `/api`
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(users::router())
}
