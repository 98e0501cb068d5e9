//! Lexical path normalization (no filesystem access, symlinks untouched).

use std::path::{Component, Path, PathBuf};

/// Normalizes `path` without touching the filesystem.
///
/// - Drops `.` components and repeated or trailing separators
/// - Resolves `..` against a preceding normal component
/// - Keeps leading `..` on relative paths; `..` directly under the root is dropped
/// - An empty result becomes `.`
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}
