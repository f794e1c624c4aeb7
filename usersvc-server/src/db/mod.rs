//! Database layer - connection pool, query building and repositories
//!
//! # Design Principles
//!
//! - Pool is injected into repositories, never global
//! - Caller-chosen columns go through the `LookupField` allow-list
//! - Values are always bound parameters
//! - Rely on DB constraints, handle conflicts - no check-then-insert

pub mod error;
pub mod migrations;
pub mod pool;
pub mod query;
pub mod repos;

pub use error::DbError;
pub use pool::{create_lazy_pool, create_pool, create_pool_with_options, PoolConfig};
pub use query::LookupField;
pub use repos::*;
pub use sqlx::PgPool;
