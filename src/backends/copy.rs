//! Tree copier
//!
//! Replaces the output directory with a fresh recursive copy of the source.
//! Uses walkdir for traversal; symlinks are followed so the copy holds content.

use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

use crate::core::error::PortError;
use crate::core::paths::{absolutize, is_within};

/// Ensure the source exists and is a directory
pub fn check_source(source: &Path) -> Result<()> {
    let meta = match fs::metadata(source) {
        Ok(m) => m,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(PortError::SourceMissing(source.to_path_buf()).into())
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", source.display()))
        }
    };

    if !meta.is_dir() {
        return Err(PortError::SourceNotDir(source.to_path_buf()).into());
    }
    Ok(())
}

/// Reject output directories that overlap the source tree
pub fn check_layout(source: &Path, output: &Path) -> Result<()> {
    let source_abs = absolutize(source).context("Failed to resolve source directory")?;
    let output_abs = absolutize(output).context("Failed to resolve output directory")?;

    // Compare canonical forms too, so a symlinked source is caught
    let source_real = source_abs.canonicalize().unwrap_or_else(|_| source_abs.clone());
    let output_real = output_abs
        .parent()
        .and_then(|p| p.canonicalize().ok())
        .and_then(|p| output_abs.file_name().map(|name| p.join(name)))
        .unwrap_or_else(|| output_abs.clone());

    if is_within(&output_abs, &source_abs) || is_within(&output_real, &source_real) {
        return Err(PortError::OutputInsideSource {
            source_dir: source.to_path_buf(),
            output: output.to_path_buf(),
        }
        .into());
    }

    if is_within(&source_abs, &output_abs) || is_within(&source_real, &output_real) {
        return Err(PortError::OutputContainsSource {
            source_dir: source.to_path_buf(),
            output: output.to_path_buf(),
        }
        .into());
    }
    Ok(())
}

/// Remove a previous output tree; returns whether anything was removed
pub fn remove_tree(path: &Path) -> Result<bool> {
    let meta = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e).with_context(|| format!("Failed to read {}", path.display())),
    };

    if meta.is_dir() {
        fs::remove_dir_all(path)
            .with_context(|| format!("Failed to remove directory {}", path.display()))?;
    } else {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }

    debug!(path = %path.display(), "removed previous output");
    Ok(true)
}

/// Copy `source` recursively to `dest`, returning the number of files copied.
///
/// `dest` must not exist yet; its parent directories are created as needed.
/// Callers run [`check_source`] first; a missing source still fails here,
/// on the first walk entry, before anything is created.
pub fn copy_tree(source: &Path, dest: &Path) -> Result<usize> {
    let mut copied = 0;

    for entry in WalkDir::new(source).follow_links(true).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", source.display()))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .with_context(|| format!("{} escapes the source tree", entry.path().display()))?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create directory {}", target.display()))?;
            continue;
        }

        fs::copy(entry.path(), &target).with_context(|| {
            format!(
                "Failed to copy {} to {}",
                entry.path().display(),
                target.display()
            )
        })?;
        debug!(from = %entry.path().display(), to = %target.display(), "copied");
        copied += 1;
    }

    Ok(copied)
}
