//! Route aggregation: composes mounted sub-routers into one routing table.

use axum::Router;
use tracing::debug;

use crate::error::RoutingError;
use crate::index::{MountInfo, RouteIndex};
use crate::mount::{RouteMount, SubRouter};
use crate::prefix;

/// Collects route mounts and composes them into a single router.
///
/// Mounts are validated together in [`RouteAggregator::build`]: malformed,
/// duplicate or overlapping prefixes reject the whole build.
pub struct RouteAggregator<S = ()> {
    mounts: Vec<RouteMount<S>>,
}

impl<S> RouteAggregator<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Create an aggregator with no mounts.
    #[must_use]
    pub fn new() -> Self {
        Self { mounts: Vec::new() }
    }

    /// Mount `sub_router` under `prefix`, tagged with `tag`.
    #[must_use]
    pub fn mount(
        self,
        prefix: impl Into<String>,
        tag: impl Into<String>,
        sub_router: SubRouter<S>,
    ) -> Self {
        self.include(RouteMount::new(prefix, tag, sub_router))
    }

    /// Add a prepared mount record.
    #[must_use]
    pub fn include(mut self, mount: RouteMount<S>) -> Self {
        self.mounts.push(mount);
        self
    }

    /// Validate every mount and compose the routing table.
    ///
    /// A sub-router route at `/` is registered as `prefix/` and also answers
    /// on the bare prefix.
    ///
    /// # Errors
    ///
    /// Returns `RoutingError` if any prefix or path is malformed, if two
    /// paths of one sub-router name the same capture differently, or if two
    /// prefixes are equal or nested.
    pub fn build(self) -> Result<ComposedRoutes<S>, RoutingError> {
        let mut mounts = self.mounts;
        mounts.sort_by(|a, b| a.prefix.cmp(&b.prefix));

        for (position, mount) in mounts.iter().enumerate() {
            prefix::validate_prefix(&mount.prefix)?;
            for path in mount.sub_router.paths() {
                prefix::validate_path(&mount.prefix, path)?;
            }
            if let Some((existing, path)) = prefix::find_capture_conflict(mount.sub_router.paths()) {
                return Err(RoutingError::CaptureConflict {
                    prefix: mount.prefix.clone(),
                    existing: existing.to_owned(),
                    path: path.to_owned(),
                });
            }

            for earlier in &mounts[..position] {
                if earlier.prefix == mount.prefix {
                    return Err(RoutingError::DuplicatePrefix(mount.prefix.clone()));
                }
                if prefix::overlaps(&earlier.prefix, &mount.prefix) {
                    return Err(RoutingError::OverlappingPrefix {
                        existing: earlier.prefix.clone(),
                        conflicting: mount.prefix.clone(),
                    });
                }
            }
        }

        let mut router = Router::new();
        let mut infos = Vec::with_capacity(mounts.len());

        for RouteMount {
            prefix: mount_prefix,
            tag,
            sub_router,
        } in mounts
        {
            let mut paths = Vec::with_capacity(sub_router.len());
            for (path, method_router) in sub_router.into_routes() {
                let full_path = prefix::join(&mount_prefix, &path);
                if path == "/" {
                    router = router.route(&mount_prefix, method_router.clone());
                }
                router = router.route(&full_path, method_router);
                paths.push(full_path);
            }

            debug!(prefix = %mount_prefix, tag = %tag, routes = paths.len(), "mounted sub-router");
            infos.push(MountInfo {
                prefix: mount_prefix,
                tag,
                paths,
            });
        }

        Ok(ComposedRoutes {
            router,
            index: RouteIndex::new(infos),
        })
    }
}

impl<S> Default for RouteAggregator<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// The result of a successful build: the composed router and its index.
pub struct ComposedRoutes<S = ()> {
    router: Router<S>,
    index: RouteIndex,
}

impl<S> ComposedRoutes<S> {
    /// Metadata describing every mount.
    #[must_use]
    pub fn index(&self) -> &RouteIndex {
        &self.index
    }

    /// Split into the router and its index.
    #[must_use]
    pub fn into_parts(self) -> (Router<S>, RouteIndex) {
        (self.router, self.index)
    }
}
