//! Selection trimming and short page labels
//!
//! A label is the selection's path relative to the directory two levels
//! above it, with every segment but the last cut down to its first
//! character: `/home/me/proj/repo` becomes `p/repo`.

use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

/// A leading segment plus its separator; group 1 is the segment's first character
static LEADING_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^/])[^/]*/").expect("valid segment pattern"));

/// Turn raw selector output into a selection
///
/// Keeps the first line without its terminator and strips exactly one
/// trailing `/`. An aborted selector yields an empty string.
pub fn trim_selection(raw: &str) -> String {
    let line = raw.lines().next().unwrap_or("");
    line.strip_suffix('/').unwrap_or(line).to_string()
}

/// Derive the display label for a selected directory
pub fn derive_label(path: &Path) -> String {
    shorten(&relative_to_grandparent(&resolve(path)))
}

/// Resolve `path` the way `realpath` would
///
/// Existing paths are canonicalized (symlinks resolved). Anything else is
/// made absolute and normalized lexically.
pub fn resolve(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| {
        let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        normalize(&absolute)
    })
}

/// Path of `path` relative to `path/../..`
///
/// Returns `.` for the filesystem root.
pub fn relative_to_grandparent(path: &Path) -> String {
    let names: Vec<_> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy()),
            _ => None,
        })
        .collect();

    if names.is_empty() {
        return ".".to_string();
    }

    let start = names.len().saturating_sub(2);
    names[start..].join("/")
}

/// Cut every segment except the last to its first character
pub fn shorten(relative: &str) -> String {
    LEADING_SEGMENT.replace_all(relative, "$1/").into_owned()
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
