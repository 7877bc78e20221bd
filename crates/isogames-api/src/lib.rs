//! ISO Standards Games API library.
//!
//! Exposes the application factory and bootstrap pieces so integration
//! tests can build the same application the binary serves.

pub mod app;
pub mod config;
pub mod error;
pub mod reload;
pub mod routes;
pub mod server;
pub mod state;
pub mod telemetry;
