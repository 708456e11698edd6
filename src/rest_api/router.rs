//! # Path Router
//!
//! Hierarchical dispatch by segment shifting: each level peels the first
//! segment off the path and hands the remainder to the next level.

use super::errors::{ApiError, ApiResult};

/// Normalise a path into rooted form, dropping empty and `.` segments and
/// resolving `..` without climbing above the root.
pub fn clean_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    format!("/{}", segments.join("/"))
}

/// Split a path into its first segment and the rooted remainder.
///
/// `""` and `"/"` give `("", "/")`.
pub fn shift_path(path: &str) -> (String, String) {
    let cleaned = clean_path(path);
    let rest = &cleaned[1..];
    match rest.find('/') {
        Some(i) => (rest[..i].to_string(), rest[i..].to_string()),
        None => (rest.to_string(), "/".to_string()),
    }
}

/// Fail with `NotFound` unless no segments remain
pub fn expect_end(path: &str) -> ApiResult<()> {
    let (next, _) = shift_path(path);
    if next.is_empty() {
        Ok(())
    } else {
        Err(ApiError::NotFound)
    }
}

/// Static table of segment names to targets, matched case-sensitively
#[derive(Debug, Clone)]
pub struct PathRouter<T> {
    routes: Vec<(&'static str, T)>,
}

impl<T> Default for PathRouter<T> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<T> PathRouter<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a target for a segment
    pub fn route(mut self, segment: &'static str, target: T) -> Self {
        self.routes.push((segment, target));
        self
    }

    /// Resolve the head segment of `path` to its target and the remaining path
    pub fn resolve(&self, path: &str) -> ApiResult<(&T, String)> {
        let (head, tail) = shift_path(path);
        self.routes
            .iter()
            .find(|(segment, _)| *segment == head)
            .map(|(_, target)| (target, tail))
            .ok_or(ApiError::NotFound)
    }
}
