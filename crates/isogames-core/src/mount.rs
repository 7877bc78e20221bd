//! Sub-routers and the mounts that place them under a prefix.

use std::collections::BTreeMap;
use std::fmt;

use axum::routing::MethodRouter;

/// A collection of routes declared relative to the prefix it will be
/// mounted under.
///
/// A sub-router never knows its own mount path; the aggregator decides it.
pub struct SubRouter<S = ()> {
    routes: BTreeMap<String, MethodRouter<S>>,
}

impl<S> SubRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Create an empty sub-router.
    #[must_use]
    pub fn new() -> Self {
        Self {
            routes: BTreeMap::new(),
        }
    }

    /// Register `method_router` at the relative `path`.
    ///
    /// Registering a path twice merges both method routers.
    ///
    /// # Panics
    ///
    /// Panics if both registrations handle the same HTTP method, as axum
    /// does for overlapping method routes.
    #[must_use]
    #[track_caller]
    pub fn route(mut self, path: &str, method_router: MethodRouter<S>) -> Self {
        let merged = match self.routes.remove(path) {
            Some(existing) => existing.merge(method_router),
            None => method_router,
        };
        self.routes.insert(path.to_owned(), merged);
        self
    }

    /// Relative paths declared by this sub-router, in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    /// Number of distinct relative paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if no routes have been declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub(crate) fn into_routes(self) -> BTreeMap<String, MethodRouter<S>> {
        self.routes
    }
}

impl<S> Default for SubRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for SubRouter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubRouter")
            .field("paths", &self.routes.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A sub-router together with its mount prefix and documentation tag.
///
/// The tag groups routes in the published route index and has no effect
/// on dispatch.
#[derive(Debug)]
pub struct RouteMount<S = ()> {
    /// Path prefix the sub-router is mounted under, e.g. `/v1/games`.
    pub prefix: String,
    /// Human-readable grouping tag, e.g. `Games`.
    pub tag: String,
    /// The routes served under `prefix`.
    pub sub_router: SubRouter<S>,
}

impl<S> RouteMount<S> {
    /// Create a new mount record.
    #[must_use]
    pub fn new(prefix: impl Into<String>, tag: impl Into<String>, sub_router: SubRouter<S>) -> Self {
        Self {
            prefix: prefix.into(),
            tag: tag.into(),
            sub_router,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::{get, post};

    #[test]
    fn test_paths_are_sorted_and_unique() {
        let sub_router: SubRouter = SubRouter::new()
            .route("/{id}", get(|| async { "one" }))
            .route("/", get(|| async { "all" }))
            .route("/", post(|| async { "created" }));

        assert_eq!(sub_router.paths().collect::<Vec<_>>(), vec!["/", "/{id}"]);
        assert_eq!(sub_router.len(), 2);
    }

    #[test]
    fn test_new_sub_router_is_empty() {
        let sub_router: SubRouter = SubRouter::default();
        assert!(sub_router.is_empty());
    }

    #[test]
    fn test_mount_keeps_tag_as_plain_data() {
        let mount: RouteMount = RouteMount::new("/v1/games", "Games", SubRouter::new());
        assert_eq!(mount.prefix, "/v1/games");
        assert_eq!(mount.tag, "Games");
    }
}
