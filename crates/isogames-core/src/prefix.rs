//! Prefix and path rules for mounts.
//!
//! The rules are at least as strict as axum's own route table, so anything
//! that passes them can be registered without a panic.

use std::collections::HashMap;

use crate::error::RoutingError;

/// Checks that `prefix` can be used as a mount point.
///
/// A prefix starts with `/`, is not the root, has no trailing slash, no
/// empty segments, no path parameters and no `:`-leading segments.
///
/// # Errors
///
/// Returns `RoutingError::InvalidPrefix` describing the first rule broken.
pub fn validate_prefix(prefix: &str) -> Result<(), RoutingError> {
    let reason = if !prefix.starts_with('/') {
        Some("must start with '/'")
    } else if prefix == "/" {
        Some("must not be the root path")
    } else if prefix.ends_with('/') {
        Some("must not end with '/'")
    } else if prefix.contains("//") {
        Some("must not contain empty segments")
    } else if prefix.contains(['{', '}', '*']) {
        Some("must not contain path parameters")
    } else if segments(prefix).any(|segment| segment.starts_with(':')) {
        Some("segments must not start with ':'")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(RoutingError::InvalidPrefix {
            prefix: prefix.to_owned(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Checks that a sub-router path is relative to its mount point.
///
/// # Errors
///
/// Returns `RoutingError::InvalidPath` if the path does not start with `/`,
/// contains empty or `:`-leading segments, or has a capture that is not a
/// whole `{name}` or trailing `{*name}` segment.
pub fn validate_path(prefix: &str, path: &str) -> Result<(), RoutingError> {
    let reason = if !path.starts_with('/') {
        Some("must start with '/'")
    } else if path.contains("//") {
        Some("must not contain empty segments")
    } else {
        segment_error(path)
    };

    match reason {
        Some(reason) => Err(RoutingError::InvalidPath {
            prefix: prefix.to_owned(),
            path: path.to_owned(),
            reason,
        }),
        None => Ok(()),
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').skip(1)
}

fn segment_error(path: &str) -> Option<&'static str> {
    let mut rest = segments(path).peekable();
    while let Some(segment) = rest.next() {
        if segment.starts_with(':') {
            return Some("segments must not start with ':'");
        }
        if segment.starts_with('*') {
            return Some("segments must not start with '*'");
        }
        if !segment.contains(['{', '}']) {
            continue;
        }
        let Some(name) = capture_name(segment) else {
            return Some("captures must span a whole segment as {name} or {*name}");
        };
        if name.starts_with('*') && rest.peek().is_some() {
            return Some("catch-all capture must be the last segment");
        }
    }
    None
}

/// The capture name of a `{name}` or `{*name}` segment, including the `*`.
fn capture_name(segment: &str) -> Option<&str> {
    let name = segment.strip_prefix('{')?.strip_suffix('}')?;
    let bare = name.strip_prefix('*').unwrap_or(name);
    if bare.is_empty() || bare.contains(['{', '}', '*', ':']) {
        None
    } else {
        Some(name)
    }
}

/// Finds two validated paths that capture the same position under
/// different names, e.g. `/{id}` and `/{name}`. Returns the path seen
/// first and the path conflicting with it.
#[must_use]
pub fn find_capture_conflict<'a, I>(paths: I) -> Option<(&'a str, &'a str)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut captures: HashMap<String, (&'a str, &'a str)> = HashMap::new();

    for path in paths {
        let mut parent = String::new();
        for segment in segments(path) {
            if let Some(name) = capture_name(segment) {
                match captures.get(&parent) {
                    Some(&(existing_name, existing_path)) if existing_name != name => {
                        return Some((existing_path, path));
                    }
                    Some(_) => {}
                    None => {
                        captures.insert(parent.clone(), (name, path));
                    }
                }
                parent.push_str("/{}");
            } else {
                parent.push('/');
                parent.push_str(segment);
            }
        }
    }

    None
}

/// Returns `true` when `a` and `b` would compete for the same requests:
/// they are equal or one is a whole-segment prefix of the other.
#[must_use]
pub fn overlaps(a: &str, b: &str) -> bool {
    contains_segmentwise(a, b) || contains_segmentwise(b, a)
}

fn contains_segmentwise(outer: &str, inner: &str) -> bool {
    inner
        .strip_prefix(outer)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Joins a validated prefix and relative path into a full path.
#[must_use]
pub fn join(prefix: &str, path: &str) -> String {
    format!("{prefix}{path}")
}

/// Returns `true` when `request_path` would be dispatched under `prefix`.
#[must_use]
pub fn matches(prefix: &str, request_path: &str) -> bool {
    contains_segmentwise(prefix, request_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versioned_prefix_is_valid() {
        assert!(validate_prefix("/v1/games").is_ok());
        assert!(validate_prefix("/users").is_ok());
    }

    #[test]
    fn test_prefix_rules_are_enforced() {
        for bad in ["v1/games", "/", "/v1/games/", "/v1//games", "/v1/{id}", "/v1/*rest", "/v1/:game", ""] {
            let err = validate_prefix(bad).unwrap_err();
            assert!(
                matches!(err, RoutingError::InvalidPrefix { ref prefix, .. } if prefix == bad),
                "expected {bad:?} to be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn test_relative_path_must_start_with_slash() {
        assert!(validate_path("/v1/games", "/").is_ok());
        assert!(validate_path("/v1/games", "/{game_id}").is_ok());
        assert_eq!(
            validate_path("/v1/games", "scores"),
            Err(RoutingError::InvalidPath {
                prefix: "/v1/games".into(),
                path: "scores".into(),
                reason: "must start with '/'",
            })
        );
        assert!(validate_path("/v1/games", "/a//b").is_err());
    }

    #[test]
    fn test_path_segments_follow_capture_syntax() {
        for good in ["/{game_id}", "/{game_id}/scores", "/files/{*rest}", "/v2:beta"] {
            assert!(validate_path("/v1/games", good).is_ok(), "{good} should be accepted");
        }
        for bad in [
            "/:id",
            "/{id",
            "/id}",
            "/{}",
            "/{*}",
            "/game-{id}",
            "/{a}{b}",
            "/{*rest}/more",
            "/*rest",
        ] {
            assert!(validate_path("/v1/games", bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_sibling_captures_with_different_names_conflict() {
        assert_eq!(
            find_capture_conflict(["/{id}", "/{name}"]),
            Some(("/{id}", "/{name}"))
        );
        assert_eq!(
            find_capture_conflict(["/{id}/scores", "/{name}/players"]),
            Some(("/{id}/scores", "/{name}/players"))
        );
        assert_eq!(
            find_capture_conflict(["/{id}", "/{*rest}"]),
            Some(("/{id}", "/{*rest}"))
        );
    }

    #[test]
    fn test_consistent_captures_do_not_conflict() {
        assert_eq!(find_capture_conflict(["/", "/{id}", "/{id}/scores", "/top"]), None);
        assert_eq!(find_capture_conflict(["/a/{id}", "/b/{name}"]), None);
    }

    #[test]
    fn test_overlap_is_segment_wise() {
        assert!(overlaps("/v1/games", "/v1/games"));
        assert!(overlaps("/v1/games", "/v1/games/archive"));
        assert!(overlaps("/v1", "/v1/users"));
        assert!(!overlaps("/v1/games", "/v1/gamesx"));
        assert!(!overlaps("/v1/games", "/v1/users"));
    }

    #[test]
    fn test_join_keeps_trailing_slash_of_root_route() {
        assert_eq!(join("/v1/games", "/"), "/v1/games/");
        assert_eq!(join("/v1/users", "/{user_id}"), "/v1/users/{user_id}");
    }

    #[test]
    fn test_matches_request_paths() {
        assert!(matches("/v1/games", "/v1/games"));
        assert!(matches("/v1/games", "/v1/games/"));
        assert!(matches("/v1/games", "/v1/games/42"));
        assert!(!matches("/v1/games", "/v1/gamesx"));
        assert!(!matches("/v1/games", "/v1/unknown/"));
    }
}
