//! ISO Standards Games Core: route composition.
//!
//! This crate models sub-routers, the mounts that place them under a path
//! prefix, and the aggregator that composes every mount into one axum
//! router. It performs no I/O.

pub mod aggregator;
pub mod error;
pub mod index;
pub mod mount;
pub mod prefix;

pub use aggregator::{ComposedRoutes, RouteAggregator};
pub use error::RoutingError;
pub use index::{MountInfo, RouteIndex};
pub use mount::{RouteMount, SubRouter};
