//! Application state shared across handlers

use std::sync::Arc;

use crate::db::UserStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    users: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { users }),
        }
    }

    pub fn users(&self) -> &dyn UserStore {
        self.inner.users.as_ref()
    }
}
