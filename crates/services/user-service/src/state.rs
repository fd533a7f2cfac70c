//! Application state for dependency injection.

use std::sync::Arc;

use crate::repository::UserRepository;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    /// Create new app state.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}
