//! Path normalization utilities
//!
//! Reported paths always use '/' as separator.

use std::path::{Component, Path, PathBuf};

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Resolve a path against the current directory without touching the filesystem.
///
/// `.` components are dropped and `..` pops the previous component, so two
/// spellings of the same location compare equal even when it does not exist yet.
pub fn absolutize(path: &Path) -> std::io::Result<PathBuf> {
    let base = if path.is_absolute() {
        PathBuf::new()
    } else {
        std::env::current_dir()?
    };

    let mut out = base;
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    Ok(out)
}

/// Check whether `path` is `root` itself or lies below it
pub fn is_within(path: &Path, root: &Path) -> bool {
    path.starts_with(root)
}

/// Check whether the file name carries the given extension (without the dot)
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == extension.trim_start_matches('.'))
        .unwrap_or(false)
}
