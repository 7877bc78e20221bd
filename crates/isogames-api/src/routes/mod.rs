//! Route modules: versioned resource sub-routers and application-level
//! endpoints.

use serde::Serialize;

pub mod docs;
pub mod games;
pub mod health;
pub mod users;

/// Body returned by a resource index endpoint.
#[derive(Debug, Serialize)]
pub struct ResourceStatus {
    /// Resource name.
    pub resource: &'static str,
    /// Always `ok`.
    pub status: &'static str,
}
