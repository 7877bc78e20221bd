//! Descriptive metadata about a composed routing table.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::prefix;

/// Metadata for one mounted sub-router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MountInfo {
    /// Mount prefix.
    pub prefix: String,
    /// Documentation tag.
    pub tag: String,
    /// Full addressable paths (prefix + relative path), sorted.
    pub paths: Vec<String>,
}

/// Read-only index of every mount in a composed routing table.
///
/// Mounts are ordered by prefix, so two builds from the same mounts produce
/// equal indexes regardless of registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteIndex {
    mounts: Vec<MountInfo>,
}

impl RouteIndex {
    pub(crate) fn new(mut mounts: Vec<MountInfo>) -> Self {
        mounts.sort_by(|a, b| a.prefix.cmp(&b.prefix));
        Self { mounts }
    }

    /// All mounts, ordered by prefix.
    #[must_use]
    pub fn mounts(&self) -> &[MountInfo] {
        &self.mounts
    }

    /// Every full path addressable through the mounts.
    #[must_use]
    pub fn addressable_paths(&self) -> BTreeSet<String> {
        self.mounts
            .iter()
            .flat_map(|mount| mount.paths.iter().cloned())
            .collect()
    }

    /// Distinct tags in prefix order.
    #[must_use]
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = Vec::new();
        for mount in &self.mounts {
            if !tags.contains(&mount.tag.as_str()) {
                tags.push(&mount.tag);
            }
        }
        tags
    }

    /// The mount a request for `path` would be dispatched into, if any.
    #[must_use]
    pub fn mount_for(&self, path: &str) -> Option<&MountInfo> {
        self.mounts
            .iter()
            .find(|mount| prefix::matches(&mount.prefix, path))
    }

    /// Number of mounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mounts.len()
    }

    /// Returns `true` if nothing was mounted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mounts.is_empty()
    }
}
