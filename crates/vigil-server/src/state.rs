//! Application state.

use std::sync::Arc;

use crate::users::UserStore;

/// Application state shared across all handlers.
#[derive(Clone, Default)]
pub struct AppState {
    users: Arc<UserStore>,
}

impl AppState {
    /// Returns the user store.
    pub fn users(&self) -> &UserStore {
        &self.users
    }
}
