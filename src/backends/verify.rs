//! Verifier - Confirms the files outside the rewritten set were copied unchanged

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

use crate::core::error::PortError;
use crate::core::paths::{has_extension, normalize_path};
use crate::core::util::{hash_file, hash_hex};

/// Compare every source file not carrying `extension` with its output copy.
///
/// Returns the number of files checked; the first difference is an error.
pub fn verify_untouched(source: &Path, output: &Path, extension: &str) -> Result<usize> {
    let mut checked = 0;

    for entry in WalkDir::new(source).follow_links(true).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", source.display()))?;
        if entry.file_type().is_dir() || has_extension(entry.path(), extension) {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(source)
            .with_context(|| format!("{} escapes the source tree", entry.path().display()))?;
        let copy = output.join(relative);
        let shown = normalize_path(&copy);

        if !copy.is_file() {
            return Err(PortError::VerifyMismatch { path: shown }.into());
        }

        let expected = hash_file(entry.path())
            .with_context(|| format!("Failed to hash {}", entry.path().display()))?;
        let actual = hash_file(&copy).with_context(|| format!("Failed to hash {}", shown))?;

        if expected != actual {
            debug!(
                path = %shown,
                expected = %hash_hex(expected),
                actual = %hash_hex(actual),
                "content mismatch"
            );
            return Err(PortError::VerifyMismatch { path: shown }.into());
        }
        checked += 1;
    }

    Ok(checked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_file(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn setup() -> (tempfile::TempDir, std::path::PathBuf, std::path::PathBuf) {
        let temp = tempdir().unwrap();
        let src = temp.path().join("src");
        let out = temp.path().join("out");
        for root in [&src, &out] {
            write_file(&root.join("res/a.properties"), "k=message2x\n");
            write_file(&root.join("README.md"), "readme\n");
        }
        write_file(&src.join("main/A.java"), "message2x\n");
        write_file(&out.join("main/A.java"), "message2\n");
        (temp, src, out)
    }

    #[test]
    fn test_verify_passes_ignoring_rewritten_extension() {
        let (_temp, src, out) = setup();
        assert_eq!(verify_untouched(&src, &out, "java").unwrap(), 2);
    }

    #[test]
    fn test_verify_detects_changed_file() {
        let (_temp, src, out) = setup();
        fs::write(out.join("README.md"), "changed\n").unwrap();

        let err = verify_untouched(&src, &out, "java").unwrap_err();
        match err.downcast_ref::<PortError>() {
            Some(PortError::VerifyMismatch { path }) => assert!(path.ends_with("README.md")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_verify_mismatch_logs_path_at_debug() {
        let (_temp, src, out) = setup();
        fs::write(out.join("README.md"), "changed\n").unwrap();

        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();
        let result = tracing::subscriber::with_default(subscriber, || {
            verify_untouched(&src, &out, "java")
        });

        match result.unwrap_err().downcast_ref::<PortError>() {
            Some(PortError::VerifyMismatch { path }) => assert!(path.ends_with("out/README.md")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_verify_detects_missing_file() {
        let (_temp, src, out) = setup();
        fs::remove_file(out.join("res/a.properties")).unwrap();

        assert!(verify_untouched(&src, &out, "java").is_err());
    }
}
