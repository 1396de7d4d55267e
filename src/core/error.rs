//! Errors raised by the port run
//!
//! Filesystem failures are carried as `anyhow` errors with path context;
//! this enum covers the conditions the tool detects itself.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortError {
    #[error("source directory does not exist: {}", .0.display())]
    SourceMissing(PathBuf),

    #[error("source is not a directory: {}", .0.display())]
    SourceNotDir(PathBuf),

    #[error(
        "output directory {} must not be the source directory or inside it ({})",
        output.display(),
        source_dir.display()
    )]
    OutputInsideSource { source_dir: PathBuf, output: PathBuf },

    #[error(
        "output directory {} contains the source directory {}",
        output.display(),
        source_dir.display()
    )]
    OutputContainsSource { source_dir: PathBuf, output: PathBuf },

    #[error("the token to replace must not be empty")]
    EmptyToken,

    #[error("file is not valid UTF-8 text: {}", .0.display())]
    NotUtf8(PathBuf),

    #[error("{path} differs from its source copy")]
    VerifyMismatch { path: String },
}
