//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Handles conflicts via ON CONFLICT (no check-then-insert)
//! - Inspects affected-row counts instead of pre-checking existence
//! - Wraps store errors per operation

pub mod users;

#[cfg(test)]
pub(crate) mod memory;

pub use users::{ConflictPolicy, User, UserRepo, UserStore};
