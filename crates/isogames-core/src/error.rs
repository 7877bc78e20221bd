//! Route composition error types.

use thiserror::Error;

/// Errors raised while composing sub-routers into a routing table.
///
/// All of them are configuration errors: they surface at build time and
/// prevent the application from being constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// A mount prefix is malformed.
    #[error("invalid mount prefix {prefix:?}: {reason}")]
    InvalidPrefix {
        /// The rejected prefix.
        prefix: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A sub-router path is malformed.
    #[error("invalid route path {path:?} under {prefix:?}: {reason}")]
    InvalidPath {
        /// The mount prefix the path was declared under.
        prefix: String,
        /// The rejected relative path.
        path: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Two paths in one sub-router capture the same position under
    /// different names.
    #[error("route path {path:?} under {prefix:?} conflicts with {existing:?}: captures at the same position must share a name")]
    CaptureConflict {
        /// The mount prefix both paths were declared under.
        prefix: String,
        /// The path registered first.
        existing: String,
        /// The conflicting path.
        path: String,
    },

    /// Two mounts share the same prefix.
    #[error("duplicate mount prefix {0:?}")]
    DuplicatePrefix(String),

    /// One mount prefix is nested inside another.
    #[error("mount prefix {conflicting:?} overlaps existing prefix {existing:?}")]
    OverlappingPrefix {
        /// The prefix that was accepted first (in prefix order).
        existing: String,
        /// The prefix that collides with it.
        conflicting: String,
    },
}
