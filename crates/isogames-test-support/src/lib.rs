//! Shared test stubs and utilities for the ISO Standards Games API.

mod http;
mod net;
mod stub;

pub use http::{get_json, get_text, send};
pub use net::OccupiedPort;
pub use stub::{labelled_sub_router, status_sub_router};
