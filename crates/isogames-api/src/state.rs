//! Shared application state.

use std::sync::Arc;

use isogames_core::RouteIndex;

/// Application state shared across all request handlers.
///
/// Read-only after construction.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Index of every mounted sub-router.
    pub route_index: Arc<RouteIndex>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(route_index: Arc<RouteIndex>) -> Self {
        Self { route_index }
    }
}
